//! Error taxonomy for the retrieval engine.
//!
//! Every failure surfaces as a typed [`ArcanaError`] so callers (the agent
//! layer, the CLI) can map each condition to a distinct user-facing message.
//! Nothing in this crate retries or substitutes default data on failure.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ArcanaError>;

#[derive(Debug, Error)]
pub enum ArcanaError {
    /// Corpus integrity violated. The builder aborts and emits nothing.
    #[error("corpus validation failed: {0}")]
    Validation(String),

    /// The embedding service could not be reached at all.
    #[error("embedding provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The embedding service answered with a non-success status.
    /// The whole batch fails; no partial results are returned.
    #[error("embedding request failed: {0}")]
    Embedding(String),

    /// A write batch failed. Earlier batches remain committed — callers
    /// must re-verify via a point count.
    #[error("vector index write failed: {0}")]
    IndexWrite(String),

    /// The vector store is unreachable or rejected a read operation.
    #[error("vector store connection failed: {0}")]
    Connection(String),

    /// Malformed caller input (non-positive limit, bad filter value).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Corpus file could not be read or written.
    #[error("corpus I/O failed at {path}: {source}")]
    CorpusIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file contents are not valid JSON for the expected shape.
    #[error("corpus parse failed: {0}")]
    CorpusParse(#[from] serde_json::Error),
}
