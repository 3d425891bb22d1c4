//! Error types for preflight.

use derive_more::{Display, Error, From};

/// Main error type for preflight operations.
///
/// `Pipeline::run_task` collapses every variant into the same "no result"
/// outcome. `Pipeline::try_run_task` returns them as-is.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A guard blocked the call.
    #[display("rejected by guard '{guard}'")]
    #[from(skip)]
    Rejected {
        /// Name of the guard that returned `false`.
        #[error(not(source))]
        guard: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Response body larger than the transport allows.
    #[display("response body exceeds {limit} bytes")]
    #[from(skip)]
    BodyTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// An after-hook failed.
    #[display("hook '{hook}' failed: {message}")]
    #[from(skip)]
    Hook {
        /// Name of the failing hook.
        hook: String,
        /// Error message.
        message: String,
    },

    /// A host platform primitive failed.
    #[display("platform error: {_0}")]
    #[from(skip)]
    Platform(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_urlencoded::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a rejection error for the named guard.
    #[must_use]
    pub fn rejected(guard: impl Into<String>) -> Self {
        Self::Rejected {
            guard: guard.into(),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a hook error.
    #[must_use]
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// Create a platform error.
    #[must_use]
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if a guard blocked the call.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if an after-hook failed.
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::Hook { .. })
    }

    /// Returns `true` if the response body exceeded the transport limit.
    #[must_use]
    pub const fn is_body_too_large(&self) -> bool {
        matches!(self, Self::BodyTooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::rejected("token");
        assert_eq!(err.to_string(), "rejected by guard 'token'");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::connection("failed to connect");
        assert_eq!(err.to_string(), "connection error: failed to connect");

        let err = Error::hook("unwrap", "missing field `code`");
        assert_eq!(err.to_string(), "hook 'unwrap' failed: missing field `code`");

        let err = Error::json_deserialization("user.address.city", "missing field `city`");
        assert_eq!(
            err.to_string(),
            "JSON deserialization error at 'user.address.city': missing field `city`"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(Error::rejected("network").is_rejected());
        assert!(!Error::Timeout.is_rejected());

        assert!(Error::Timeout.is_timeout());
        assert!(!Error::connection("failed").is_timeout());

        assert!(Error::connection("failed").is_connection());
        assert!(!Error::Timeout.is_connection());

        assert!(Error::hook("h", "boom").is_hook());
        assert!(!Error::platform("cache unavailable").is_hook());
    }

    #[test]
    fn body_too_large_reports_limit() {
        let err = Error::BodyTooLarge { limit: 1024 };
        assert!(err.is_body_too_large());
        assert_eq!(err.to_string(), "response body exceeds 1024 bytes");
    }

    #[test]
    fn error_from_url_parse() {
        let err: Error = url::Url::parse("not a url").expect_err("invalid").into();
        assert!(err.to_string().starts_with("invalid URL"));
    }
}
