//! Error types for rotation engine operations.

use thiserror::Error;

/// Errors produced by the rotation engines.
#[derive(Debug, Error)]
pub enum RotationError {
    /// A referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A precondition on program, block, or offering state failed.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// A retry-safety guard rejected a mutation that already happened.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Persisted data violates an invariant the engines rely on.
    #[error("data integrity: {0}")]
    DataIntegrity(String),
    /// Backend-specific store failure with context.
    #[error("store error: {0}")]
    Store(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
