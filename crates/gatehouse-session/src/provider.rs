//! Provider scope
//!
//! A [`SessionProvider`] owns one store for its lifetime. Mounting it kicks
//! off the startup session check; code running inside [`SessionProvider::scope`]
//! reaches the store through [`use_session`].

use std::future::Future;
use tokio::task::JoinHandle;

use crate::error::SessionError;
use crate::store::SessionStore;
use crate::Result;

tokio::task_local! {
    static CURRENT_SESSION: SessionStore;
}

/// The store for the enclosing provider scope.
///
/// Fails with [`SessionError::OutsideProvider`] when called outside of
/// [`SessionProvider::scope`] or [`SessionProvider::sync_scope`].
pub fn use_session() -> Result<SessionStore> {
    CURRENT_SESSION
        .try_with(SessionStore::clone)
        .map_err(|_| SessionError::OutsideProvider)
}

pub struct SessionProvider {
    store: SessionStore,
    startup: Option<JoinHandle<()>>,
}

impl SessionProvider {
    /// Mount a provider around `store` and start the initial session check
    /// in the background. Must be called from within a tokio runtime.
    pub fn mount(store: SessionStore) -> Self {
        let startup = tokio::spawn({
            let store = store.clone();
            async move {
                store.check_session().await;
            }
        });

        tracing::info!(store = %store.id(), "Session provider mounted");

        Self {
            store,
            startup: Some(startup),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Wait for the startup check to settle. Later calls return immediately.
    pub async fn ready(&mut self) {
        if let Some(startup) = self.startup.take() {
            if let Err(e) = startup.await {
                if !e.is_cancelled() {
                    tracing::error!(store = %self.store.id(), "Startup session check failed: {}", e);
                }
            }
        }
    }

    /// Run `fut` with this provider's store reachable through [`use_session`]
    pub async fn scope<F: Future>(&self, fut: F) -> F::Output {
        CURRENT_SESSION.scope(self.store.clone(), fut).await
    }

    pub fn sync_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT_SESSION.sync_scope(self.store.clone(), f)
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        if let Some(startup) = self.startup.take() {
            startup.abort();
        }
        self.store.teardown();

        tracing::debug!(store = %self.store.id(), "Session provider torn down");
    }
}
