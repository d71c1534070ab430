//! Test doubles shared by the store and provider tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use tokio::sync::Notify;

use gatehouse_auth::{AuthClient, AuthError, AuthResponse, User};
use gatehouse_cookies::MemoryTokenStore;
use gatehouse_navigation::HistoryNavigator;

use crate::store::SessionStore;

/// Auth client that replays queued replies. A gated client parks every
/// lookup until [`ScriptedAuth::release`] is called.
pub struct ScriptedAuth {
    replies: Mutex<VecDeque<gatehouse_auth::Result<AuthResponse>>>,
    gated: bool,
    started: Notify,
    release: Notify,
}

impl ScriptedAuth {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            gated: false,
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::new()
        }
    }

    pub fn push(&self, reply: gatehouse_auth::Result<AuthResponse>) {
        self.replies.lock().push_back(reply);
    }

    /// Wait until a lookup has started
    pub async fn started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl AuthClient for ScriptedAuth {
    async fn get_user(&self) -> gatehouse_auth::Result<AuthResponse> {
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::InvalidResponse("no scripted reply".to_string())));

        self.started.notify_one();
        if self.gated {
            self.release.notified().await;
        }

        reply
    }
}

pub struct Fixture {
    pub store: SessionStore,
    pub auth: Arc<ScriptedAuth>,
    pub tokens: Arc<MemoryTokenStore>,
    pub navigator: Arc<HistoryNavigator>,
}

pub fn fixture(auth: ScriptedAuth) -> Fixture {
    let auth = Arc::new(auth);
    let tokens = Arc::new(MemoryTokenStore::new());
    let navigator = Arc::new(HistoryNavigator::new());
    let store = SessionStore::new(auth.clone(), tokens.clone(), navigator.clone());

    Fixture {
        store,
        auth,
        tokens,
        navigator,
    }
}

pub fn sample_user() -> User {
    User::new("USR-000")
        .with_name("Sofia Rivers")
        .with_email("sofia@example.com")
}

/// Log output captured on the current thread while the value is alive
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

#[derive(Clone)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_logs() -> LogCapture {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = SharedWriter(buffer.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    LogCapture {
        buffer,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}
