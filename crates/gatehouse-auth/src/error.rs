//! Auth client error types

use thiserror::Error;

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Token store error: {0}")]
    Token(#[from] gatehouse_cookies::TokenError),
}

impl AuthError {
    pub fn status(status: reqwest::StatusCode, body: &str) -> Self {
        AuthError::Status {
            status: status.as_u16(),
            body: truncate_body(body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_long_bodies() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 10);
        let truncated = truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with(&format!("{} total bytes)", body.len())));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let body = "é".repeat(MAX_ERROR_BODY_LENGTH);
        let truncated = truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }
}
