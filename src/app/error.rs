//! Error taxonomy of the recipe repository.

use crate::domain::validation::FieldErrors;
use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Invalid recipe ID")]
    InvalidIdentifier(String),
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),
    #[error("Recipe not found")]
    NotFound,
    #[error("Recipe payload must be a JSON object")]
    InvalidPayload,
    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Document store error: {0}")]
    Store(anyhow::Error),
}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => RepositoryError::StoreUnavailable(msg),
            StoreError::Backend(err) => RepositoryError::Store(err),
        }
    }
}
