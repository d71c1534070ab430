//! Application root
//!
//! Builds the collaborators once and hands out session providers.

use std::sync::Arc;

use gatehouse_auth::HttpAuthClient;
use gatehouse_cookies::{CookieJar, MemoryTokenStore, TokenStore};
use gatehouse_navigation::Navigator;
use gatehouse_session::{SessionConfig, SessionProvider, SessionStore};
use gatehouse_storage::Database;

use crate::config::Config;
use crate::Result;

pub struct App {
    config: Config,
    session_config: SessionConfig,
    tokens: Arc<dyn TokenStore>,
    auth: Arc<HttpAuthClient>,
    navigator: Arc<dyn Navigator>,
}

impl App {
    /// Open the token store and build the auth client. `navigator` is the
    /// host UI's router.
    pub fn new(config: Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let session_config = config.session_config()?;

        let tokens: Arc<dyn TokenStore> = if config.persist_tokens {
            let db = Database::open(&config.database_path)?;
            Arc::new(CookieJar::open(db)?)
        } else {
            Arc::new(MemoryTokenStore::new())
        };

        let auth = HttpAuthClient::new(&config.api_url()?, tokens.clone(), config.request_timeout())?
            .with_cookie_name(config.token_cookie.clone());

        tracing::info!(
            endpoint = %auth.endpoint(),
            persist_tokens = config.persist_tokens,
            "App initialized"
        );

        Ok(Self {
            config,
            session_config,
            tokens,
            auth: Arc::new(auth),
            navigator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// A fresh store; each provider gets its own
    pub fn session_store(&self) -> SessionStore {
        SessionStore::with_config(
            self.auth.clone(),
            self.tokens.clone(),
            self.navigator.clone(),
            self.session_config.clone(),
        )
    }

    /// Mount a provider, starting the initial session check
    pub fn mount(&self) -> SessionProvider {
        SessionProvider::mount(self.session_store())
    }
}
