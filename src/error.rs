//! Error types for the matching engine. Distinct from the writing errors the
//! classifier reports as data (`ErrorRecord`); these are call-cannot-proceed failures.

use thiserror::Error;

/// Failures raised by the matching engine itself (§7).
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid stroke: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid config: {reason}")]
    ConfigError { reason: String },
}

/// Failures raised while loading a character corpus (§10.1). Kept separate from
/// `MatchError`, which is reserved for the matching call itself.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("io error reading corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json corpus: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed corpus entry: {reason}")]
    Malformed { reason: String },
}
