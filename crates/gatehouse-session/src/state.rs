//! Session state snapshot

use gatehouse_auth::User;
use serde::{Deserialize, Serialize};

/// What the application believes about the current user.
///
/// Authentication is derived from `user` on read and never stored, so the
/// two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl SessionState {
    /// State of a freshly mounted provider, before the first check settles
    pub fn initial() -> Self {
        Self {
            user: None,
            error: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            error: None,
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::default();
        assert!(state.is_loading);
        assert!(state.user.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_authenticated_follows_user() {
        let mut state = SessionState::signed_out();
        assert!(!state.is_authenticated());

        state.user = Some(User::new("USR-1"));
        assert!(state.is_authenticated());

        state.user = None;
        assert!(!state.is_authenticated());
    }
}
