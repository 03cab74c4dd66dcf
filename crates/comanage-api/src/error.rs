use std::collections::BTreeMap;

use thiserror::Error;

/// Top-level error type for the `comanage-api` crate.
///
/// Local failures (option validation, unsupported operations) never touch
/// the network. Remote failures keep the HTTP status and the reason text the
/// registry sent, verbatim.
#[derive(Debug, Error)]
pub enum Error {
    // ── Local ───────────────────────────────────────────────────────
    /// An enumerated parameter is outside its allowed set.
    #[error("Invalid Fields '{field}': {value:?} is not an accepted value")]
    InvalidOption { field: &'static str, value: String },

    /// A search was issued without any of the filters it requires.
    #[error("Missing filter: at least one of {0} is required")]
    MissingFilter(&'static str),

    /// The registry has no endpoint for this operation.
    #[error("Not Implemented: {0}")]
    NotImplemented(&'static str),

    // ── Authentication ──────────────────────────────────────────────
    /// HTTP 401 from the registry (bad or missing basic-auth credentials).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Registry API ────────────────────────────────────────────────
    /// Any other non-success status from the registry.
    ///
    /// `reason` is the registry's own reason text (e.g. "Name In Use",
    /// "CoPersonRole Exists"); distinct 403 rules share a status code and
    /// are only told apart by this text.
    #[error("HTTP {status}: {reason}")]
    Http {
        status: u16,
        reason: String,
        invalid_fields: Option<BTreeMap<String, Vec<String>>>,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl Error {
    /// HTTP status associated with this error, if it came from the registry.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Reason text supplied by the registry, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Http { reason, .. } => Some(reason),
            Self::Authentication { message } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` if the referenced id does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` for errors raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption { .. } | Self::MissingFilter(_) | Self::NotImplemented(_)
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The library itself never retries; this is a hint for callers.
    /// Local errors are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_exposes_status_and_reason() {
        let err = Error::Http {
            status: 403,
            reason: "CoPersonRole Exists".into(),
            invalid_fields: None,
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.reason(), Some("CoPersonRole Exists"));
        assert_eq!(err.to_string(), "HTTP 403: CoPersonRole Exists");
        assert!(!err.is_not_found());
        assert!(!err.is_transient());
    }

    #[test]
    fn not_implemented_is_local_and_permanent() {
        let err = Error::NotImplemented("names.add");
        assert!(err.is_local());
        assert!(!err.is_transient());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 500,
            reason: "Other Error".into(),
            invalid_fields: None,
        };
        assert!(err.is_transient());
    }
}
