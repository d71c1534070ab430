//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] gatehouse_storage::StorageError),

    #[error("Token store error: {0}")]
    Token(#[from] gatehouse_cookies::TokenError),

    #[error("Auth error: {0}")]
    Auth(#[from] gatehouse_auth::AuthError),

    #[error("Session error: {0}")]
    Session(#[from] gatehouse_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] gatehouse_navigation::NavigationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
