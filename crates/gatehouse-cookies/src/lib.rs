//! Gatehouse Cookies
//!
//! Durable, expiring name/value storage for the bearer token. Two stores are
//! provided behind the [`TokenStore`] trait:
//! - [`CookieJar`]: persisted in SQLite, survives a restart
//! - [`MemoryTokenStore`]: process-local

mod cookie;
mod error;
mod jar;
mod memory;
mod store;

pub use cookie::{Cookie, CookieOptions};
pub use error::TokenError;
pub use jar::CookieJar;
pub use memory::MemoryTokenStore;
pub use store::TokenStore;

pub type Result<T> = std::result::Result<T, TokenError>;
