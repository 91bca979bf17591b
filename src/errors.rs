use thiserror::Error;

/// Error type that captures failures at the fallible edges of the crate.
///
/// The derivation engine itself is total and never returns an error; this
/// type covers persistence and record management.
#[derive(Debug, Error)]
pub enum SalonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
