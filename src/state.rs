use crate::config::AppConfig;
use crate::db::{DbPool, OrmConn, create_orm_conn, create_pool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}

impl AppState {
    /// Open both database handles. Failure here is fatal for the process.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url).await?;
        let orm = create_orm_conn(&config.database_url).await?;
        Ok(Self { pool, orm })
    }
}
