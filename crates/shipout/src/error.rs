//! Error types for the OMS client.

use std::fmt;

use reqwest::StatusCode;

/// Business failure reported inside a well-formed response envelope.
///
/// Renders as `"code: message"`, or just the message when the provider sent
/// no error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedError {
    code: String,
    message: String,
}

impl WrappedError {
    /// Build an error from a code and candidate messages in priority order.
    ///
    /// The first candidate that is not blank after trimming wins. When every
    /// candidate is blank the message is empty.
    pub fn new<I, S>(code: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let message = messages
            .into_iter()
            .find_map(|m| {
                let trimmed = m.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_default();

        Self {
            code: code.into(),
            message,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for WrappedError {}

/// Broad classification of a [`ShipoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, TLS or timeout failure, or a non-2xx HTTP status.
    Transport,
    /// Response body is not the expected JSON shape.
    Decode,
    /// Envelope decoded but the provider reported a failure.
    Business,
    /// Request parameters failed local checks; nothing was sent.
    Validation,
    /// Client configuration is incomplete or unusable.
    Config,
}

/// OMS client errors.
#[derive(Debug, thiserror::Error)]
pub enum ShipoutError {
    /// Connection, TLS or timeout failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// The provider answered with a non-2xx status.
    #[error("{status}: {body}")]
    Http { status: StatusCode, body: String },

    /// Response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The provider reported a business failure.
    #[error(transparent)]
    Business(#[from] WrappedError),

    /// Request parameters failed validation.
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ShipoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } | Self::Http { .. } => ErrorKind::Transport,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Business(_) => ErrorKind::Business,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Business | ErrorKind::Validation => 1,
            ErrorKind::Config => 2,
            ErrorKind::Transport | ErrorKind::Decode => 3,
        }
    }

    /// The business error, if the provider reported one.
    pub fn as_wrapped(&self) -> Option<&WrappedError> {
        match self {
            Self::Business(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ShipoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for OMS operations.
pub type ShipoutResult<T> = Result<T, ShipoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_error_with_code() {
        let err = WrappedError::new("E1", ["", "bad input"]);
        assert_eq!(err.code(), "E1");
        assert_eq!(err.message(), "bad input");
        assert_eq!(err.to_string(), "E1: bad input");
    }

    #[test]
    fn test_wrapped_error_without_code() {
        let err = WrappedError::new("", ["boom"]);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_wrapped_error_priority_order() {
        let err = WrappedError::new("E2", ["仓库不存在", "warehouse not found"]);
        assert_eq!(err.message(), "仓库不存在");
    }

    #[test]
    fn test_wrapped_error_skips_whitespace_and_trims() {
        let err = WrappedError::new("E3", ["   \t\n", "  spaced out  "]);
        assert_eq!(err.message(), "spaced out");
    }

    #[test]
    fn test_wrapped_error_all_blank() {
        let err = WrappedError::new("E4", ["", "  "]);
        assert_eq!(err.message(), "");
        assert_eq!(err.to_string(), "E4: ");

        let err = WrappedError::new("", Vec::<String>::new());
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_http_error_display() {
        let err = ShipoutError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "500 Internal Server Error: Bad Gateway");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_business_error_is_transparent() {
        let err = ShipoutError::from(WrappedError::new("E1", ["bad input"]));
        assert_eq!(err.to_string(), "E1: bad input");
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.as_wrapped().map(WrappedError::code), Some("E1"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ShipoutError::validation("x").exit_code(), 1);
        assert_eq!(ShipoutError::config("x").exit_code(), 2);
        let network = ShipoutError::Network {
            message: "refused".into(),
        };
        assert_eq!(network.exit_code(), 3);
        assert!(network.as_wrapped().is_none());
    }
}
