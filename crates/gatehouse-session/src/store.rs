//! Session store
//!
//! Holds the state for one provider and performs the three writes:
//! `check_session`, `sign_in` and `sign_out`.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

use gatehouse_auth::{AuthClient, AuthResponse};
use gatehouse_cookies::{CookieOptions, TokenStore};
use gatehouse_navigation::{Navigator, Route};

use crate::state::SessionState;
use crate::Result;

/// Cookie the bearer token is written to
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Token lifetime: two hours, in days
const ACCESS_TOKEN_EXPIRES_DAYS: f64 = 1.0 / 12.0;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub token_cookie: String,
    pub token_options: CookieOptions,
    /// Where to go once sign-in has refreshed the user
    pub after_sign_in: Route,
    /// Where to go after sign-out
    pub after_sign_out: Route,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_cookie: ACCESS_TOKEN_COOKIE.to_string(),
            token_options: CookieOptions::new(ACCESS_TOKEN_EXPIRES_DAYS, true),
            after_sign_in: Route::dashboard(),
            after_sign_out: Route::sign_in(),
        }
    }
}

/// How a session check ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The result was written to the state
    Applied,
    /// A newer check or a sign-out happened first; the result was dropped
    Superseded,
}

/// Continuation of the latest `sign_in`
struct PendingSignIn {
    generation: u64,
    handle: AbortHandle,
}

struct Inner {
    /// Identifies this store in logs
    id: Uuid,
    state: watch::Sender<SessionState>,
    /// Id of the most recent intent (check or sign-out)
    latest_request: AtomicU64,
    sign_in_generation: AtomicU64,
    /// Held across the "still current?" check and the post sign-in push so a
    /// sign-out cannot land between them
    pending_sign_in: Mutex<Option<PendingSignIn>>,
    auth: Arc<dyn AuthClient>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    config: SessionConfig,
}

impl Inner {
    fn next_request_id(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, request_id: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == request_id
    }

    fn abort_pending_sign_in(&self) {
        if let Some(pending) = self.pending_sign_in.lock().take() {
            pending.handle.abort();
        }
    }

    /// Forget the pending continuation, but only if it is still `generation`
    fn clear_pending_sign_in(&self, generation: u64) {
        let mut pending = self.pending_sign_in.lock();
        if pending.as_ref().is_some_and(|p| p.generation == generation) {
            pending.take();
        }
    }
}

/// Authentication state for one provider instance. Cloning shares the store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    pub fn new(
        auth: Arc<dyn AuthClient>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_config(auth, tokens, navigator, SessionConfig::default())
    }

    pub fn with_config(
        auth: Arc<dyn AuthClient>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        config: SessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::initial());

        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                state,
                latest_request: AtomicU64::new(0),
                sign_in_generation: AtomicU64::new(0),
                pending_sign_in: Mutex::new(None),
                auth,
                tokens,
                navigator,
                config,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Current snapshot
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Receiver that is notified whenever the state actually changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Ask the auth client who the current user is and record the answer.
    ///
    /// Failures are logged and leave the user signed out; they are never
    /// returned to the caller.
    pub async fn check_session(&self) -> CheckOutcome {
        self.run_check().await.1
    }

    async fn run_check(&self) -> (u64, CheckOutcome) {
        let request_id = self.inner.next_request_id();
        tracing::debug!(store = %self.inner.id, request_id, "Checking session");

        let outcome = match self.inner.auth.get_user().await {
            Ok(AuthResponse {
                error: Some(message),
                ..
            }) if !message.is_empty() => {
                tracing::error!(store = %self.inner.id, request_id, "{}", message);
                self.apply(request_id, |state| {
                    state.user = None;
                    state.is_loading = false;
                })
            }
            Ok(AuthResponse { data, .. }) => self.apply(request_id, |state| {
                state.user = data;
                state.error = None;
                state.is_loading = false;
            }),
            Err(e) => {
                tracing::error!(store = %self.inner.id, request_id, "{}", e);
                self.apply(request_id, |state| {
                    state.user = None;
                    state.is_loading = false;
                })
            }
        };

        (request_id, outcome)
    }

    /// Write `update` unless a newer intent has been registered since
    /// `request_id` was issued.
    fn apply<F>(&self, request_id: u64, update: F) -> CheckOutcome
    where
        F: FnOnce(&mut SessionState),
    {
        let mut outcome = CheckOutcome::Superseded;

        self.inner.state.send_if_modified(|state| {
            if !self.inner.is_current(request_id) {
                return false;
            }
            outcome = CheckOutcome::Applied;

            let before = state.clone();
            update(state);
            *state != before
        });

        match outcome {
            CheckOutcome::Applied => {
                let state = self.inner.state.borrow();
                tracing::info!(
                    store = %self.inner.id,
                    request_id,
                    authenticated = state.is_authenticated(),
                    user_id = state.user.as_ref().map(|u| u.id.as_str()).unwrap_or(""),
                    "Session updated"
                );
            }
            CheckOutcome::Superseded => {
                tracing::debug!(
                    store = %self.inner.id,
                    request_id,
                    "Discarded stale session check"
                );
            }
        }

        outcome
    }

    /// Store `token`, refresh the user in the background and, if that
    /// refresh is still the latest intent when it lands, navigate to the
    /// post sign-in route.
    ///
    /// The token is not validated. The returned handle may be dropped; the
    /// continuation keeps running until it finishes or a sign-out aborts it.
    pub fn sign_in(&self, token: &str) -> Result<JoinHandle<()>> {
        let config = &self.inner.config;
        let cookie = self
            .inner
            .tokens
            .set(&config.token_cookie, token, config.token_options)?;

        tracing::info!(
            store = %self.inner.id,
            cookie = %cookie.name,
            expires_at = %cookie.expires_at,
            "Stored access token"
        );

        let generation = self.inner.sign_in_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let store = self.clone();
        let handle = tokio::spawn(async move {
            store.finish_sign_in(generation).await;
        });

        // A newer sign-in replaces the older continuation
        let previous = self.inner.pending_sign_in.lock().replace(PendingSignIn {
            generation,
            handle: handle.abort_handle(),
        });
        if let Some(previous) = previous {
            previous.handle.abort();
        }

        Ok(handle)
    }

    async fn finish_sign_in(&self, generation: u64) {
        let (request_id, outcome) = self.run_check().await;

        {
            let _pending = self.inner.pending_sign_in.lock();
            if outcome == CheckOutcome::Applied && self.inner.is_current(request_id) {
                self.inner.navigator.push(&self.inner.config.after_sign_in);
            } else {
                tracing::debug!(
                    store = %self.inner.id,
                    request_id,
                    "Sign-in superseded, not navigating"
                );
            }
        }

        self.inner.clear_pending_sign_in(generation);
    }

    /// Forget the token and the user, then navigate to the post sign-out
    /// route. Purely client side.
    ///
    /// State and navigation are updated even when the token cannot be
    /// removed; that failure is returned afterwards.
    pub fn sign_out(&self) -> Result<()> {
        let removed = self.inner.tokens.remove(&self.inner.config.token_cookie);
        if let Err(e) = &removed {
            tracing::error!(store = %self.inner.id, "Failed to remove access token: {}", e);
        }

        // Any check still in flight is now stale
        let request_id = {
            let mut pending = self.inner.pending_sign_in.lock();
            if let Some(previous) = pending.take() {
                previous.handle.abort();
            }
            self.inner.next_request_id()
        };

        self.inner.state.send_if_modified(|state| {
            let next = SessionState::signed_out();
            if *state == next {
                return false;
            }
            *state = next;
            true
        });

        tracing::info!(store = %self.inner.id, request_id, "Signed out");

        self.inner.navigator.push(&self.inner.config.after_sign_out);

        removed.map_err(Into::into)
    }

    /// Stop background work owned by this store
    pub(crate) fn teardown(&self) {
        self.inner.abort_pending_sign_in();
    }
}
