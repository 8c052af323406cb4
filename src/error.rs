use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("insufficient stock, available: {available}")]
    InsufficientStock { available: i32 },

    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("database error: {0}")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
