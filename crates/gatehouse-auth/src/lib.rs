//! Gatehouse Auth
//!
//! Answers "who is the current user" for the session store. The backend
//! reply is either `{ "data": User | null }` or `{ "error": "..." }`; a
//! transport or protocol failure surfaces as [`AuthError`] instead.

mod client;
mod error;
mod http;
mod user;

pub use client::AuthClient;
pub use error::AuthError;
pub use http::{HttpAuthClient, DEFAULT_TOKEN_COOKIE, USER_ENDPOINT};
pub use user::{AuthResponse, User};

pub type Result<T> = std::result::Result<T, AuthError>;
