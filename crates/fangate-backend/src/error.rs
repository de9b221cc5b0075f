use std::time::Duration;

use thiserror::Error;

/// Everything a single backend call can die of.
///
/// Variants that saw an HTTP status line carry it; `status_code()` folds
/// the rest to 0, the convention the aggregated response uses for calls
/// that never reached the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request timed out ({0:?} exceeded)")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid JSON in response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },

    #[error("GraphQL errors: {0}")]
    GraphQl(String),
}

impl BackendError {
    /// HTTP status observed for this failure, 0 when none was.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Timeout(_) | Self::Transport(_) => 0,
            Self::Status { status, .. } | Self::Decode { status, .. } => *status,
            // Backend answered 200 but reported query errors in-band.
            Self::GraphQl(_) => 200,
        }
    }
}
