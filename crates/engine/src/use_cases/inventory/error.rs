//! Inventory operation errors.

use crate::infrastructure::ports::RepoError;
use charsheet_domain::{DomainError, ItemId};

/// Errors that can occur during inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("Validation error: {0}")]
    Validation(DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for InventoryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownItem(id) => InventoryError::UnknownItem(id),
            other => InventoryError::Validation(other),
        }
    }
}
