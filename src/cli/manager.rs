use std::io;

use crate::{
    cli::input,
    models::{OrderStatus, SessionUser},
    services::order_service,
    state::AppState,
};

pub async fn run(state: &AppState, user: &SessionUser) -> anyhow::Result<()> {
    loop {
        println!();
        println!("--- Manager menu ({}) ---", user.name);
        println!("1. Pending orders");
        println!("2. Approve order");
        println!("3. View catalog");
        println!("0. Sign out");

        match input::read_parsed::<u32>("> ")? {
            1 => view_pending(state).await,
            2 => approve_order(state).await?,
            3 => super::show_catalog(state).await,
            0 => break,
            _ => println!("Invalid selection"),
        }
    }

    Ok(())
}

async fn view_pending(state: &AppState) {
    match order_service::list_all_orders(state, Some(OrderStatus::Pending)).await {
        Ok(summaries) if summaries.is_empty() => println!("No pending orders"),
        Ok(summaries) => {
            println!("Pending orders:");
            super::print_summaries(&summaries);
        }
        Err(err) => println!("Error: {err}"),
    }
}

async fn approve_order(state: &AppState) -> io::Result<()> {
    let id = input::read_parsed::<i32>("Order id to approve: ")?;

    match order_service::approve(state, id).await {
        Ok(()) => println!("Order #{id} approved"),
        Err(err) => println!("Error: {err}"),
    }

    Ok(())
}
