use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }

    /// Insert failure; a unique-index violation becomes `Conflict(message)`.
    pub fn on_insert(e: DbErr, message: &str) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict(message.to_string()),
            _ => Self::db(e),
        }
    }
}
