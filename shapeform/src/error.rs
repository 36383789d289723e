use core::fmt;

use shapeform_core::{ReflectError, Shape};

use crate::KeyPath;

/// A type that cannot be mapped to form data.
///
/// Reported when a type is first inspected; nothing is cached for it.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields of a record share a wire key.
    DuplicateKey {
        /// The record.
        shape: &'static Shape,
        /// The shared key.
        key: &'static str,
        /// The field declared first.
        first: &'static str,
        /// The field declared second.
        second: &'static str,
    },
    /// A record declares more than one additional-properties field.
    MultipleAdditionalProperties {
        /// The record.
        shape: &'static Shape,
        /// The field declared first.
        first: &'static str,
        /// The field declared second.
        second: &'static str,
    },
    /// An additional-properties field is not a text-keyed map.
    InvalidAdditionalPropertiesShape {
        /// The record.
        shape: &'static Shape,
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A type with no form representation, or one used where it can't be.
    UnsupportedShape {
        /// The type.
        shape: &'static Shape,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateKey {
                shape,
                key,
                first,
                second,
            } => write!(
                f,
                "fields `{first}` and `{second}` of `{shape}` both use the key `{key}`"
            ),
            SchemaError::MultipleAdditionalProperties {
                shape,
                first,
                second,
            } => write!(
                f,
                "`{shape}` has two additional-properties fields: `{first}` and `{second}`"
            ),
            SchemaError::InvalidAdditionalPropertiesShape {
                shape,
                field,
                reason,
            } => write!(
                f,
                "additional-properties field `{field}` of `{shape}` {reason}"
            ),
            SchemaError::UnsupportedShape { shape, reason } => {
                write!(f, "`{shape}` is not supported: {reason}")
            }
        }
    }
}

impl core::error::Error for SchemaError {}

/// Writes ` at `path`` or ` at the top level`.
struct At<'a>(&'a KeyPath);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("at the top level")
        } else {
            write!(f, "at `{}`", self.0)
        }
    }
}

/// Failure while writing a value as form data.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum EncodeError {
    /// The value's type is not representable.
    Schema(SchemaError),
    /// A container refused to hand out its contents.
    Reflect {
        /// Where it happened.
        path: KeyPath,
        /// The underlying failure.
        error: ReflectError,
    },
    /// The value did not look the way its shape says it should.
    ShapeMismatch {
        /// Where it happened.
        path: KeyPath,
        /// What the shape called for.
        expected: &'static str,
        /// What the value held.
        found: &'static str,
    },
    /// A key contains `[` or `]`, which would read back as extra nesting.
    BracketInKey {
        /// The container holding the key.
        path: KeyPath,
        /// The offending key.
        key: String,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Schema(error) => write!(f, "{error}"),
            EncodeError::Reflect { path, error } => {
                write!(f, "could not read value {}: {error}", At(path))
            }
            EncodeError::ShapeMismatch {
                path,
                expected,
                found,
            } => write!(f, "expected {expected} {}, found {found}", At(path)),
            EncodeError::BracketInKey { path, key } => {
                write!(f, "key `{key}` {} contains a bracket", At(path))
            }
        }
    }
}

impl core::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EncodeError::Schema(error) => Some(error),
            EncodeError::Reflect { error, .. } => Some(error),
            EncodeError::ShapeMismatch { .. } | EncodeError::BracketInKey { .. } => None,
        }
    }
}

impl From<SchemaError> for EncodeError {
    fn from(error: SchemaError) -> Self {
        EncodeError::Schema(error)
    }
}

/// Failure while reading form data into a value.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The target type is not representable.
    Schema(SchemaError),
    /// A key did not follow the `name[segment]...` grammar.
    MalformedKey {
        /// The key, percent-decoded.
        key: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Keys disagree about what lives at a position.
    TypeConflict {
        /// The contested position.
        path: KeyPath,
        /// How the keys disagree.
        reason: &'static str,
    },
    /// A token or a group of keys doesn't fit the target type.
    ValueConversion {
        /// Where it happened.
        path: KeyPath,
        /// The offending token, or `None` when the keys under `path` have
        /// the wrong structure.
        token: Option<String>,
        /// What the target type called for.
        expected: String,
    },
    /// A key matched no field, and the record keeps no additional properties.
    UnknownField {
        /// The unmatched key.
        path: KeyPath,
    },
    /// The decoded value could not be turned into the target type.
    Reflect(ReflectError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Schema(error) => write!(f, "{error}"),
            DecodeError::MalformedKey { key, reason } => {
                write!(f, "malformed key `{key}`: {reason}")
            }
            DecodeError::TypeConflict { path, reason } => {
                write!(f, "conflicting keys {}: {reason}", At(path))
            }
            DecodeError::ValueConversion {
                path,
                token: Some(token),
                expected,
            } => write!(f, "cannot read `{token}` {} as {expected}", At(path)),
            DecodeError::ValueConversion {
                path,
                token: None,
                expected,
            } => write!(f, "expected {expected} {}", At(path)),
            DecodeError::UnknownField { path } => write!(f, "unknown field `{path}`"),
            DecodeError::Reflect(error) => write!(f, "{error}"),
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DecodeError::Schema(error) => Some(error),
            DecodeError::Reflect(error) => Some(error),
            _ => None,
        }
    }
}

impl From<SchemaError> for DecodeError {
    fn from(error: SchemaError) -> Self {
        DecodeError::Schema(error)
    }
}

impl From<ReflectError> for DecodeError {
    fn from(error: ReflectError) -> Self {
        DecodeError::Reflect(error)
    }
}
