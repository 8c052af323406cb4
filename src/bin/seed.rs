use shop_console::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Migrations also ensure the three fixed role users exist.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;
    seed_products(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // Prices are minor currency units.
    let products = vec![
        ("Mechanical Keyboard", 550_000i64, 25),
        ("USB-C Dock", 320_000, 40),
        ("Laptop Stand", 120_000, 60),
        ("Noise-canceling Headphones", 990_000, 15),
    ];

    for (name, price, stock) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, price, stock_quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
