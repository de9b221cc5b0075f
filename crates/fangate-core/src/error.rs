use thiserror::Error;

/// Failure taxonomy shared across the gateway crates.
///
/// `InvalidRequest` is caller-caused and maps to a 4xx at the HTTP edge.
/// `Invariant` marks a programming defect detected at runtime (a built
/// query failing its own mode check) and maps to a 5xx.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
