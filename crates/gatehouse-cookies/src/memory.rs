//! Process-local token store

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cookie::{Cookie, CookieOptions};
use crate::store::TokenStore;
use crate::Result;

#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    cookies: Arc<RwLock<HashMap<String, Cookie>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.cookies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.read().is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<Cookie> {
        let cookie = Cookie::new(name, value, options)?;
        self.cookies
            .write()
            .insert(cookie.name.clone(), cookie.clone());
        Ok(cookie)
    }

    fn get(&self, name: &str) -> Result<Option<Cookie>> {
        let cookie = self.cookies.read().get(name).cloned();
        match cookie {
            Some(c) if c.is_expired() => {
                self.cookies.write().remove(name);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.cookies.write().remove(name);
        Ok(())
    }
}
