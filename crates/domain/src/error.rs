//! Domain level errors.

/// Errors raised while interpreting snapshot data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The pool type tag is not one of the known pool types.
    #[error("Unknown pool type: {0}")]
    UnknownPoolType(String),
}
