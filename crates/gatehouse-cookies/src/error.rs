//! Token store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Cookie name cannot be empty")]
    EmptyName,

    #[error("Invalid cookie expiry: {0} days")]
    InvalidExpiry(f64),

    #[error("Storage error: {0}")]
    Storage(#[from] gatehouse_storage::StorageError),
}

