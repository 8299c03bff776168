use abi_types::{TypeParseError, ValueError};
use thiserror::Error;

/// Result alias used across the encoding crate.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors produced while encoding constructor arguments.
///
/// Every failure aborts the whole encode; there is no partial output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Signature is outside the accepted grammar, or is a rejected tuple form.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Numeric value does not fit the declared width.
    #[error("value {value} is out of range for {ty}")]
    OutOfRange { ty: String, value: String },

    /// Fixed-size bytes, address or fixed array has the wrong length.
    #[error("length mismatch for {ty}: expected {expected}, got {actual}")]
    LengthMismatch {
        ty: String,
        expected: usize,
        actual: usize,
    },

    /// Malformed hex, malformed address, or a value of the wrong kind.
    #[error("invalid {ty} value: {reason}")]
    InvalidFormat { ty: String, reason: String },

    /// Type list and value list lengths differ.
    #[error("expected {expected} argument(s) but got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Interface description is not a usable list of entries.
    #[error("interface description is not usable: {0}")]
    StructuralInvalid(String),
}

impl EncodeError {
    pub(crate) fn invalid(ty: impl ToString, reason: impl Into<String>) -> Self {
        EncodeError::InvalidFormat {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<TypeParseError> for EncodeError {
    fn from(err: TypeParseError) -> Self {
        EncodeError::UnsupportedType(err.to_string())
    }
}

impl From<ValueError> for EncodeError {
    fn from(err: ValueError) -> Self {
        EncodeError::invalid("argument", err.to_string())
    }
}
