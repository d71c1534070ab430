//! Gatehouse Core
//!
//! Wires the session store to its collaborators: the cookie jar, the HTTP
//! auth client and a navigator supplied by the host UI.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use gatehouse_auth::{AuthClient, AuthError, AuthResponse, HttpAuthClient, User};
pub use gatehouse_cookies::{Cookie, CookieJar, CookieOptions, MemoryTokenStore, TokenError, TokenStore};
pub use gatehouse_navigation::{HistoryNavigator, NavigationError, Navigator, Route};
pub use gatehouse_session::{
    use_session, CheckOutcome, SessionConfig, SessionError, SessionProvider, SessionState,
    SessionStore,
};
pub use gatehouse_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
