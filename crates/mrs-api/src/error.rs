use thiserror::Error;

/// Top-level error type for the `mrs-api` crate.
///
/// Covers every failure mode of the dashboard API: transport problems,
/// HTTP error statuses, application-level failures reported inside a 2xx
/// body, and payloads that don't match the documented envelope shapes.
/// `mrs-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend reported a failure -- either a non-2xx status or a 2xx
    /// body whose success flag was false. Carries the server-supplied
    /// message when one was present.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status, when the failure came from the status line rather
        /// than the body.
        status: Option<u16>,
    },

    /// The body parsed as JSON but did not match the documented envelope
    /// (or wasn't JSON at all). Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for failures of the connection itself, as opposed to
    /// failures reported by a reachable backend.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}
