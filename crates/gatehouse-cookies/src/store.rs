//! Token store abstraction

use crate::cookie::{Cookie, CookieOptions};
use crate::Result;

/// A single global namespace of expiring cookies.
///
/// Writers are not coordinated: the last `set` for a name wins. Expired
/// entries read as absent.
pub trait TokenStore: Send + Sync {
    /// Store `value` under `name`, replacing any previous entry.
    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<Cookie>;

    /// Current, unexpired entry for `name`.
    fn get(&self, name: &str) -> Result<Option<Cookie>>;

    /// Delete `name`. Removing a missing entry is not an error.
    fn remove(&self, name: &str) -> Result<()>;

    /// Convenience accessor for the raw value.
    fn value(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(name)?.map(|cookie| cookie.value))
    }
}
