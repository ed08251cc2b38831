use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(ModelError),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Conflict(m) => Self::Conflict(m),
            other => Self::Model(other),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }

    /// Message safe to hand back to an API client.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(m)
            | ServiceError::NotFound(m)
            | ServiceError::Forbidden(m)
            | ServiceError::Conflict(m) => m.clone(),
            ServiceError::Model(ModelError::Validation(m) | ModelError::Conflict(m)) => m.clone(),
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => "Internal server error".to_string(),
        }
    }
}

pub(crate) fn missing_fields() -> ServiceError {
    ServiceError::Validation("Please provide all required fields".into())
}
