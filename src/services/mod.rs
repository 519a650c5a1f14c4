use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod cache;
pub mod finance;
pub mod guard;
pub mod notify;
pub mod reconcile;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
