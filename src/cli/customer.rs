use std::io;

use crate::{
    cli::input::{self, format_price},
    dto::orders::AddItemRequest,
    error::AppError,
    models::{PaymentMethod, SessionUser},
    services::order_service,
    state::AppState,
};

pub async fn run(state: &AppState, user: &SessionUser) -> anyhow::Result<()> {
    loop {
        println!();
        println!("--- Customer menu ({}) ---", user.name);
        println!("1. Create order");
        println!("2. My orders");
        println!("3. Pay order");
        println!("4. View catalog");
        println!("0. Sign out");

        match input::read_parsed::<u32>("> ")? {
            1 => create_order(state, user).await?,
            2 => my_orders(state, user).await,
            3 => pay_order(state, user).await?,
            4 => super::show_catalog(state).await,
            0 => break,
            _ => println!("Invalid selection"),
        }
    }

    Ok(())
}

async fn create_order(state: &AppState, user: &SessionUser) -> io::Result<()> {
    let order = match order_service::create_order(state, user.id).await {
        Ok(order) => order,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };
    println!("Order #{} created", order.id);

    while input::confirm("Add an item? (y/n): ")? {
        let product_id = input::read_parsed::<i32>("Product id: ")?;
        let quantity = input::read_parsed::<i32>("Quantity: ")?;

        match order_service::add_item(state, order.id, AddItemRequest { product_id, quantity })
            .await
        {
            Ok(order) => println!(
                "Item added, order total is now {}",
                format_price(order.total_price)
            ),
            Err(AppError::NotFound) => println!("Product not found"),
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

async fn my_orders(state: &AppState, user: &SessionUser) {
    let orders = match order_service::list_orders_for_user(state, user.id).await {
        Ok(orders) => orders,
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };
    if orders.is_empty() {
        println!("You have no orders yet");
        return;
    }

    println!("Your orders:");
    for order in &orders {
        println!(
            "Order #{} | status: {} | total: {} | placed: {}",
            order.id,
            order.status,
            format_price(order.total_price),
            order.order_date.format("%Y-%m-%d %H:%M")
        );
        match order_service::order_lines(state, order.id).await {
            Ok(lines) => {
                for line in &lines {
                    println!(
                        "  - {} x{} = {}",
                        line.product_name,
                        line.quantity,
                        format_price(line.price * i64::from(line.quantity))
                    );
                }
            }
            Err(err) => println!("  Error: {err}"),
        }
    }
}

async fn pay_order(state: &AppState, user: &SessionUser) -> io::Result<()> {
    let order_id = input::read_parsed::<i32>("Order id to pay: ")?;

    println!("Payment methods:");
    println!("1. Card");
    println!("2. Wallet");
    println!("3. SBP");
    let method = PaymentMethod::from_choice(input::read_parsed::<u32>("Method: ")?);

    match order_service::pay_order(state, order_id, user.id, method).await {
        Ok(order) => println!(
            "Payment of {} by {} accepted, order #{} is now {}",
            format_price(order.total_price),
            method.as_str(),
            order.id,
            order.status
        ),
        Err(AppError::NotFound) => println!("Order not found or it does not belong to you"),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}
