use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_console::{cli::session, config::AppConfig, db::run_migrations, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            // Quiet by default; override with RUST_LOG.
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::init(&config).await?;
    run_migrations(&state.orm).await?;

    tracing::info!("connected to the shop database");
    println!("Connected to the shop database");

    session::run(&state).await?;

    Ok(())
}
