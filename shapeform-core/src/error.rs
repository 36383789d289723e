use core::fmt;

use crate::Shape;

/// Errors raised while reading or rebuilding a value through its shape.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ReflectError {
    /// A container operation failed.
    OperationFailed {
        /// The shape of the value the operation was performed on.
        shape: &'static Shape,
        /// Which operation failed.
        operation: &'static str,
    },

    /// The value tree does not have the form the shape expects.
    WrongShape {
        /// The shape being rebuilt.
        shape: &'static Shape,
        /// What the value tree held instead.
        actual: &'static str,
    },

    /// A scalar does not fit the target type.
    OutOfRange {
        /// The shape being rebuilt.
        shape: &'static Shape,
        /// Textual form of the offending scalar.
        value: String,
    },

    /// A fixed-size array received the wrong number of items.
    LengthMismatch {
        /// The shape being rebuilt.
        shape: &'static Shape,
        /// Required number of items.
        expected: usize,
        /// Number of items received.
        actual: usize,
    },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectError::OperationFailed { shape, operation } => {
                write!(f, "operation `{operation}` failed on `{shape}`")
            }
            ReflectError::WrongShape { shape, actual } => {
                write!(f, "cannot build `{shape}` from {actual}")
            }
            ReflectError::OutOfRange { shape, value } => {
                write!(f, "value `{value}` is out of range for `{shape}`")
            }
            ReflectError::LengthMismatch {
                shape,
                expected,
                actual,
            } => write!(f, "`{shape}` needs {expected} items, got {actual}"),
        }
    }
}

impl core::error::Error for ReflectError {}
