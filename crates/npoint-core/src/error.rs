//! Error types for npoint

use thiserror::Error;

/// Main error type for npoint operations
#[derive(Debug, Error)]
pub enum NpointError {
    /// Malformed matcher template (bounds matrix, arity, random count)
    #[error("Template error: {0}")]
    Template(String),

    /// Malformed permutation set
    #[error("Permutation error: {0}")]
    Permutation(String),

    /// Malformed point set (coordinates, weights)
    #[error("Point set error: {0}")]
    PointSet(String),

    /// Error in matcher configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias for npoint operations
pub type Result<T> = std::result::Result<T, NpointError>;
