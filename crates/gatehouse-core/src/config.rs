//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use gatehouse_cookies::CookieOptions;
use gatehouse_navigation::Route;
use gatehouse_session::{SessionConfig, ACCESS_TOKEN_COOKIE};

use crate::error::CoreError;
use crate::Result;

/// Overrides `api_base_url` when set
pub const API_URL_ENV: &str = "GATEHOUSE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file holding the cookie jar
    pub database_path: PathBuf,
    /// Keep the token on disk; otherwise it lives only in memory
    pub persist_tokens: bool,
    /// Backend the current-user lookup is sent to
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub token_cookie: String,
    /// Token lifetime in days (1/12 is two hours)
    pub token_expires_days: f64,
    pub secure_cookie: bool,
    pub after_sign_in: String,
    pub after_sign_out: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let session = SessionConfig::default();

        Self {
            database_path: data_dir.join("gatehouse.db"),
            persist_tokens: true,
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 30,
            token_cookie: ACCESS_TOKEN_COOKIE.to_string(),
            token_expires_days: session.token_options.expires_days,
            secure_cookie: session.token_options.secure,
            after_sign_in: session.after_sign_in.to_string(),
            after_sign_out: session.after_sign_out.to_string(),
        }
    }

    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.apply_overrides(std::env::var(API_URL_ENV).ok());

        tracing::debug!(path = %path.as_ref().display(), "Loaded config");

        Ok(config)
    }

    fn apply_overrides(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
    }

    pub fn api_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .map_err(|e| CoreError::Config(format!("api_base_url {:?}: {}", self.api_base_url, e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Session store settings derived from this config
    pub fn session_config(&self) -> Result<SessionConfig> {
        if self.token_cookie.trim().is_empty() {
            return Err(CoreError::Config("token_cookie cannot be empty".to_string()));
        }

        let token_options = CookieOptions::new(self.token_expires_days, self.secure_cookie);
        token_options.lifetime()?;

        Ok(SessionConfig {
            token_cookie: self.token_cookie.clone(),
            token_options,
            after_sign_in: Route::parse(&self.after_sign_in)?,
            after_sign_out: Route::parse(&self.after_sign_out)?,
        })
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("gatehouse"))
            .unwrap_or_else(|| PathBuf::from(".gatehouse"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Platform data directory lookup
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_defaults() {
        let config = Config::new(PathBuf::from("/tmp/gh"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/gh/gatehouse.db"));
        assert_eq!(config.token_cookie, "accessToken");
        assert_eq!(config.after_sign_in, "/dashboard");
        assert_eq!(config.after_sign_out, "/auth/sign-in");
        assert!(config.secure_cookie);

        let session = config.session_config().unwrap();
        assert_eq!(
            session.token_options.lifetime().unwrap(),
            CookieOptions::hours(2).lifetime().unwrap()
        );
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gatehouse.json");
        std::fs::write(
            &path,
            r#"{ "api_base_url": "https://api.example.com", "after_sign_in": "/home" }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.after_sign_in, "/home");
        assert_eq!(config.token_cookie, "accessToken");
        assert_eq!(config.session_config().unwrap().after_sign_in.as_str(), "/home");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("missing.json")),
            Err(CoreError::Io(_))
        ));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(Config::load(&path), Err(CoreError::Serialization(_))));
    }

    #[test]
    fn test_api_url_override() {
        let mut config = Config::new(PathBuf::from("/tmp"));
        config.apply_overrides(Some("https://staging.example.com".to_string()));
        assert_eq!(config.api_base_url, "https://staging.example.com");

        config.apply_overrides(Some("  ".to_string()));
        config.apply_overrides(None);
        assert_eq!(config.api_base_url, "https://staging.example.com");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::new(PathBuf::from("/tmp"));
        config.api_base_url = "not a url".to_string();
        assert!(matches!(config.api_url(), Err(CoreError::Config(_))));

        let mut config = Config::new(PathBuf::from("/tmp"));
        config.after_sign_out = "login".to_string();
        assert!(matches!(config.session_config(), Err(CoreError::Navigation(_))));

        let mut config = Config::new(PathBuf::from("/tmp"));
        config.token_expires_days = -1.0;
        assert!(matches!(config.session_config(), Err(CoreError::Token(_))));

        let mut config = Config::new(PathBuf::from("/tmp"));
        config.token_expires_days = 1.0e9;
        assert!(matches!(config.session_config(), Err(CoreError::Token(_))));
    }
}
