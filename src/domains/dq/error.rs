//! Errors returned by the DQ client.

use thiserror::Error;

/// Maximum number of body characters kept in an error message.
pub const ERROR_BODY_LIMIT: usize = 500;

/// Failures talking to the DQ service.
///
/// Every variant is an upstream failure from the caller's point of view.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DqError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Sign-in was rejected.
    #[error("Authentication failed: HTTP {status}: {body}")]
    Auth { status: u16, body: String },

    /// Sign-in succeeded but carried no token.
    #[error("Authentication failed: response did not contain a token")]
    MissingToken,

    /// The service could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Any other transport level failure.
    #[error("Request failed: {0}")]
    Request(String),

    /// The body was not valid JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid DQ base URL '{0}'")]
    InvalidUrl(String),
}

impl DqError {
    /// Build an [`DqError::Http`] from a status and raw body, truncating the body.
    pub fn http(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            body: truncate(body),
        }
    }

    /// Build an [`DqError::Auth`] from a status and raw body, truncating the body.
    pub fn auth(status: u16, body: &str) -> Self {
        Self::Auth {
            status,
            body: truncate(body),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DqError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_truncates_body() {
        let body = "x".repeat(2000);
        let err = DqError::http(500, &body);
        match &err {
            DqError::Http { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body.len(), ERROR_BODY_LIMIT);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("HTTP 500: "));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(DqError::auth(403, "denied").status(), Some(403));
        assert_eq!(DqError::Connection("refused".into()).status(), None);
    }
}
