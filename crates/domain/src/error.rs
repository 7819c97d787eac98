//! Error types for the domain layer
//!
//! Only face-count assignment can fail. Rolling, flipping, and the accessors
//! are total.

use thiserror::Error;

/// Error when assigning a face count or parsing a dice value object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// The input is not a number (or not the kind of value expected)
    #[error("Expected {expected}, got '{found}'")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// The face count is a number but not greater than 1, or too large to hold
    #[error("The number of faces must be between 2 and {max}, got {0}", max = u32::MAX)]
    OutOfRange(String),
}

impl DiceError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create an out of range error, keeping the value as the caller wrote it
    pub fn out_of_range(found: impl ToString) -> Self {
        Self::OutOfRange(found.to_string())
    }

    /// Check if this is a type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Check if this is an out of range face count
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }
}
