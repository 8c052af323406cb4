use std::io;

use crate::{
    cli::input,
    dto::products::{CreateProductRequest, UpdateProductRequest},
    models::{OrderStatus, SessionUser},
    services::{catalog_service, order_service},
    state::AppState,
};

pub async fn run(state: &AppState, user: &SessionUser) -> anyhow::Result<()> {
    loop {
        println!();
        println!("--- Administrator menu ({}) ---", user.name);
        println!("1. Add product");
        println!("2. Update product");
        println!("3. View all orders");
        println!("4. Change order status");
        println!("5. View catalog");
        println!("0. Sign out");

        match input::read_parsed::<u32>("> ")? {
            1 => add_product(state).await?,
            2 => update_product(state).await?,
            3 => view_orders(state).await,
            4 => change_status(state).await?,
            5 => super::show_catalog(state).await,
            0 => break,
            _ => println!("Invalid selection"),
        }
    }

    Ok(())
}

async fn add_product(state: &AppState) -> io::Result<()> {
    let name = input::read_line("Product name: ")?;
    let price = input::read_price("Price: ")?;
    let stock = input::read_parsed::<i32>("Quantity in stock: ")?;

    match catalog_service::add_product(state, CreateProductRequest { name, price, stock }).await {
        Ok(product) => println!("Product #{} added", product.id),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}

async fn update_product(state: &AppState) -> io::Result<()> {
    let id = input::read_parsed::<i32>("Product id: ")?;
    let price = input::read_price("New price: ")?;
    let stock = input::read_parsed::<i32>("New quantity: ")?;

    match catalog_service::update_product(state, id, UpdateProductRequest { price, stock }).await {
        Ok(()) => println!("Product updated"),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}

async fn view_orders(state: &AppState) {
    match order_service::list_all_orders(state, None).await {
        Ok(summaries) if summaries.is_empty() => println!("No orders yet"),
        Ok(summaries) => {
            println!("All orders:");
            super::print_summaries(&summaries);
        }
        Err(err) => println!("Error: {err}"),
    }
}

async fn change_status(state: &AppState) -> io::Result<()> {
    let id = input::read_parsed::<i32>("Order id: ")?;
    let raw = input::read_line("New status (pending/processing/completed/canceled/returned): ")?;

    let Some(status) = OrderStatus::parse(&raw) else {
        println!("Unknown status: {raw}");
        return Ok(());
    };

    match order_service::set_status(state, id, status).await {
        Ok(()) => println!("Status updated"),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}
