//! Cookie data structure

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;
use crate::Result;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Write options for a cookie. Expiry is expressed in (fractional) days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookieOptions {
    pub expires_days: f64,
    /// Only send over secure transports
    pub secure: bool,
}

impl CookieOptions {
    pub fn new(expires_days: f64, secure: bool) -> Self {
        Self {
            expires_days,
            secure,
        }
    }

    /// Secure cookie that lives for `hours`
    pub fn hours(hours: u32) -> Self {
        Self::new(f64::from(hours) / 24.0, true)
    }

    /// Lifetime of a cookie written now. Rejects expiries that are not
    /// positive or that land past the representable date range.
    pub fn lifetime(&self) -> Result<Duration> {
        let lifetime = self.duration()?;
        self.expires_from(Utc::now())?;
        Ok(lifetime)
    }

    /// Expiry timestamp of a cookie written at `now`
    pub fn expires_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        now.checked_add_signed(self.duration()?)
            .ok_or(TokenError::InvalidExpiry(self.expires_days))
    }

    fn duration(&self) -> Result<Duration> {
        let invalid = TokenError::InvalidExpiry(self.expires_days);
        if !self.expires_days.is_finite() || self.expires_days <= 0.0 {
            return Err(invalid);
        }

        let millis = (self.expires_days * MILLIS_PER_DAY).round();
        if millis >= i64::MAX as f64 {
            return Err(invalid);
        }
        Duration::try_milliseconds(millis as i64).ok_or(invalid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub secure: bool,
    pub created_at: DateTime<Utc>,
}

impl Cookie {
    pub fn new(name: &str, value: &str, options: CookieOptions) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(TokenError::EmptyName);
        }

        let now = Utc::now();
        let expires_at = options.expires_from(now)?;
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            expires_at,
            secure: options.secure,
            created_at: now,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
