//! Gatehouse Session
//!
//! Single source of truth for "who is logged in right now":
//! - One [`SessionStore`] per [`SessionProvider`], never shared between providers
//! - State is only written by `check_session`, `sign_in` and `sign_out`
//! - Consumers read snapshots or subscribe to changes
//! - The latest user intent wins: a check that completes after a newer
//!   check or a sign-out is discarded

mod error;
mod provider;
mod state;
mod store;

#[cfg(test)]
mod testing;

pub use error::SessionError;
pub use provider::{use_session, SessionProvider};
pub use state::SessionState;
pub use store::{CheckOutcome, SessionConfig, SessionStore, ACCESS_TOKEN_COOKIE};

pub type Result<T> = std::result::Result<T, SessionError>;
