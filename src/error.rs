//! Error type shared by the fixed-point routines

use thiserror::Error;

/// Failures raised by the fixed-point routines.
///
/// None of these are recoverable inside a computation: the caller gets the
/// error back and the single computation is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// An input or intermediate left the domain of the formula
    /// (non-positive reserve, zero spot price, non-finite value).
    #[error("invalid domain input: {0}")]
    InvalidDomainInput(String),

    /// A fixed-point value does not fit in a 256-bit word.
    #[error("encoding overflow: {0} does not fit in 256 bits")]
    EncodingOverflow(String),

    /// A negative real value asked for an unsigned encoding.
    #[error("negative value {0} has no unsigned encoding")]
    NegativeValue(String),

    /// A hex string that is not a well-formed 32-byte ABI word.
    #[error("malformed word: {0}")]
    MalformedWord(String),
}

impl MathError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        MathError::InvalidDomainInput(msg.into())
    }
}

/// Result alias for the library routines.
pub type Result<T> = std::result::Result<T, MathError>;
