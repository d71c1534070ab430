//! Auth client abstraction

use async_trait::async_trait;

use crate::user::AuthResponse;
use crate::Result;

/// Resolves the current user from ambient credentials.
///
/// Expected to be idempotent and free of side effects. `Ok` carries the
/// backend's answer, including an explicit `{ error }` reply; `Err` means the
/// lookup itself failed.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn get_user(&self) -> Result<AuthResponse>;
}
