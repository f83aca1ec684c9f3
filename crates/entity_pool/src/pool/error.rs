//! Pool error types

use thiserror::Error;

/// Errors that can occur during pool operations
///
/// All of these are recoverable: callers log them and continue without an
/// instance. Nothing in the pool core aborts the host.
#[derive(Debug, Error)]
pub enum PoolError {
    /// A spawn was requested for a name no registered kind answers to
    #[error("no kind named `{0}` is registered")]
    InvalidRequest(String),

    /// Instance construction needed a blueprint the template does not carry
    #[error("template `{0}` has no blueprint to construct instances from")]
    ResourceUnavailable(String),

    /// A kind with this name is already registered
    #[error("kind `{0}` is already registered")]
    DuplicateKind(String),
}
