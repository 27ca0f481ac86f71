//! Store error types.

use smartcart_commerce::CommerceError;
use thiserror::Error;

/// Errors from the document store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A document with this ID already exists.
    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    /// A lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Map the not-found case to a domain error, passing every other
    /// store failure through as a storage error. Keeps a poisoned lock
    /// from masquerading as a missing document.
    pub fn map_not_found(self, not_found: CommerceError) -> CommerceError {
        match self {
            StoreError::NotFound(_) => not_found,
            other => CommerceError::Storage(other.to_string()),
        }
    }
}

impl From<StoreError> for CommerceError {
    fn from(e: StoreError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}
