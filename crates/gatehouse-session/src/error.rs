//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session accessed outside of a SessionProvider scope")]
    OutsideProvider,

    #[error("Token store error: {0}")]
    Token(#[from] gatehouse_cookies::TokenError),
}
