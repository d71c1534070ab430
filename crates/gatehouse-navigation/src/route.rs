//! In-app route paths

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::Result;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Absolute path inside the application, e.g. `/auth/sign-in`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// Parse a path. It must start with `/` and contain no whitespace.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if !input.starts_with('/') || input.starts_with("//") {
            return Err(NavigationError::InvalidRoute(input.to_string()));
        }
        if input.chars().any(char::is_whitespace) {
            return Err(NavigationError::InvalidRoute(input.to_string()));
        }

        Ok(Self(input.to_string()))
    }

    /// Post sign-in destination
    pub fn dashboard() -> Self {
        Self(DASHBOARD_PATH.to_string())
    }

    /// Post sign-out destination
    pub fn sign_in() -> Self {
        Self(SIGN_IN_PATH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Route {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}
