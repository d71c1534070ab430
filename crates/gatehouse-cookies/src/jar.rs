//! Persistent cookie jar
//!
//! Cookies are written through to SQLite and cached in memory. Only
//! unexpired rows are loaded on open.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use gatehouse_storage::Database;

use crate::cookie::{Cookie, CookieOptions};
use crate::store::TokenStore;
use crate::Result;

pub struct CookieJar {
    /// In-memory cookie cache
    cookies: Arc<RwLock<HashMap<String, Cookie>>>,
    /// Database for persistence
    db: Database,
}

fn timestamp(at: DateTime<Utc>) -> String {
    // Fixed format so timestamps compare lexicographically in SQL
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl CookieJar {
    /// Open the jar and load every unexpired cookie
    pub fn open(db: Database) -> Result<Self> {
        let jar = Self {
            cookies: Arc::new(RwLock::new(HashMap::new())),
            db,
        };
        let purged = jar.purge_expired()?;
        let loaded = jar.load()?;

        tracing::debug!(loaded, purged, "Opened cookie jar");

        Ok(jar)
    }

    fn load(&self) -> Result<usize> {
        let cookies: Vec<Cookie> = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name, value, expires_at, secure, created_at FROM cookies",
            )?;

            let cookies: Vec<Cookie> = stmt
                .query_map([], |row| {
                    let expires_str: String = row.get(2)?;
                    let created_str: String = row.get(4)?;
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        expires_str,
                        row.get::<_, i32>(3)? != 0,
                        created_str,
                    ))
                })?
                .filter_map(|r| r.ok())
                .filter_map(|(name, value, expires_str, secure, created_str)| {
                    // A row with an unreadable expiry is treated as expired
                    let expires_at = parse_timestamp(&expires_str)?;
                    let created_at = parse_timestamp(&created_str).unwrap_or(expires_at);
                    Some(Cookie {
                        name,
                        value,
                        expires_at,
                        secure,
                        created_at,
                    })
                })
                .collect();

            Ok(cookies)
        })?;

        let mut cache = self.cookies.write();
        let mut loaded = 0;
        for cookie in cookies.into_iter().filter(|c| !c.is_expired()) {
            cache.insert(cookie.name.clone(), cookie);
            loaded += 1;
        }

        Ok(loaded)
    }

    fn save_cookie(&self, cookie: &Cookie) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cookies (name, value, expires_at, secure, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    cookie.name,
                    cookie.value,
                    timestamp(cookie.expires_at),
                    cookie.secure as i32,
                    timestamp(cookie.created_at),
                ],
            )?;
            Ok(())
        })?;

        self.cookies
            .write()
            .insert(cookie.name.clone(), cookie.clone());

        Ok(())
    }

    /// Delete expired cookies from disk and cache. Returns the number of rows removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM cookies WHERE expires_at <= ?1",
                [timestamp(now)],
            )?)
        })?;

        self.cookies.write().retain(|_, c| !c.is_expired_at(now));

        if removed > 0 {
            tracing::debug!(removed, "Purged expired cookies");
        }

        Ok(removed)
    }
}

impl TokenStore for CookieJar {
    fn set(&self, name: &str, value: &str, options: CookieOptions) -> Result<Cookie> {
        let cookie = Cookie::new(name, value, options)?;
        self.save_cookie(&cookie)?;

        tracing::debug!(
            cookie = %cookie.name,
            expires_at = %cookie.expires_at,
            secure = cookie.secure,
            "Stored cookie"
        );

        Ok(cookie)
    }

    fn get(&self, name: &str) -> Result<Option<Cookie>> {
        let cookie = self.cookies.read().get(name).cloned();
        match cookie {
            Some(c) if c.is_expired() => {
                self.remove(name)?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM cookies WHERE name = ?1", [name])?;
            Ok(())
        })?;

        if self.cookies.write().remove(name).is_some() {
            tracing::debug!(cookie = %name, "Removed cookie");
        }

        Ok(())
    }
}

impl Clone for CookieJar {
    fn clone(&self) -> Self {
        Self {
            cookies: Arc::clone(&self.cookies),
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cookie_jar() {
        let db = Database::open_in_memory().unwrap();
        let jar = CookieJar::open(db).unwrap();

        let cookie = jar
            .set("accessToken", "tok123", CookieOptions::new(1.0 / 12.0, true))
            .unwrap();
        assert!(cookie.secure);

        let stored = jar.get("accessToken").unwrap().unwrap();
        assert_eq!(stored.value, "tok123");

        jar.remove("accessToken").unwrap();
        assert!(jar.get("accessToken").unwrap().is_none());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.db");

        {
            let jar = CookieJar::open(Database::open(&path).unwrap()).unwrap();
            jar.set("accessToken", "persisted", CookieOptions::hours(2))
                .unwrap();
        }

        let jar = CookieJar::open(Database::open(&path).unwrap()).unwrap();
        let cookie = jar.get("accessToken").unwrap().unwrap();
        assert_eq!(cookie.value, "persisted");
        assert!(cookie.secure);
        assert_eq!(cookie.expires_at - cookie.created_at, Duration::hours(2));
    }

    #[test]
    fn test_expired_rows_are_purged_on_open() {
        let db = Database::open_in_memory().unwrap();
        let past = Utc::now() - Duration::minutes(5);
        db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO cookies (name, value, expires_at, secure, created_at)
                 VALUES ('accessToken', 'stale', ?1, 1, ?1)",
                [timestamp(past)],
            )?;
            Ok(())
        })
        .unwrap();

        let jar = CookieJar::open(db.clone()).unwrap();
        assert!(jar.get("accessToken").unwrap().is_none());

        let rows: i32 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM cookies", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_clones_share_state() {
        let jar = CookieJar::open(Database::open_in_memory().unwrap()).unwrap();
        let other = jar.clone();

        jar.set("accessToken", "shared", CookieOptions::hours(1))
            .unwrap();
        assert_eq!(other.value("accessToken").unwrap().as_deref(), Some("shared"));
    }
}
