pub mod admin;
pub mod customer;
pub mod input;
pub mod manager;
pub mod session;

use crate::{models::OrderSummary, services::catalog_service, state::AppState};
use self::input::format_price;

/// Product catalog listing shared by every role menu.
async fn show_catalog(state: &AppState) {
    match catalog_service::list_products(state).await {
        Ok(products) if products.is_empty() => println!("The catalog is empty"),
        Ok(products) => {
            println!("Product catalog:");
            for product in &products {
                println!(
                    "#{} | {} | price: {} | in stock: {}",
                    product.id,
                    product.name,
                    format_price(product.price),
                    product.stock
                );
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn print_summaries(summaries: &[OrderSummary]) {
    for summary in summaries {
        println!(
            "#{} | customer: {} | status: {} | total: {} | placed: {}",
            summary.order_id,
            summary.customer_name,
            summary.status,
            format_price(summary.total_price),
            summary.order_date.format("%Y-%m-%d %H:%M")
        );
    }
}
