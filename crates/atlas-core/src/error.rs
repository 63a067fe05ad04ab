use thiserror::Error;

/// Top-level error type for the Atlas system.
///
/// Each variant corresponds to a failure domain. Collaborator failures
/// (embedding, generation) carry the backend's message verbatim. No error is
/// swallowed or retried internally; everything propagates to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Generation provider error: {0}")]
    GenerationProvider(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AtlasError {
    fn from(err: toml::de::Error) -> Self {
        AtlasError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AtlasError {
    fn from(err: toml::ser::Error) -> Self {
        AtlasError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
