//! Gatehouse Storage Layer
//!
//! SQLite-backed persistence for the cookie jar, so a stored token
//! survives a restart.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
