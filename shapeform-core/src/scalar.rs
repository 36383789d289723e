//! Scalar kinds and scalar values.

use std::borrow::Cow;
use core::fmt;

/// All scalar types a form field can hold.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum ScalarKind {
    /// Primitive type `bool`.
    Bool,
    /// Primitive type `char`.
    Char,
    /// `String`.
    String,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `u128`.
    U128,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `i128`.
    I128,
    /// Primitive type `isize`.
    ISize,
}

impl ScalarKind {
    /// Returns true for kinds that hold free-form text.
    pub const fn is_text(self) -> bool {
        matches!(self, ScalarKind::String)
    }

    /// Parses a decoded wire token into a scalar of this kind.
    ///
    /// Integers are range-checked against the kind. Booleans accept
    /// `true`/`false` as well as the `on`/`off`/`1`/`0` forms browsers send
    /// for checkboxes.
    pub fn parse(self, text: &str) -> Option<Scalar<'static>> {
        use ScalarKind::*;
        let scalar = match self {
            Bool => Scalar::Bool(match text {
                "true" | "on" | "1" => true,
                "false" | "off" | "0" => false,
                _ => return None,
            }),
            Char => {
                let mut chars = text.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Scalar::Char(c)
            }
            String => Scalar::Str(Cow::Owned(text.to_owned())),
            F32 => Scalar::F32(text.parse().ok()?),
            F64 => Scalar::F64(text.parse().ok()?),
            U8 => Scalar::U64(text.parse::<u8>().ok()?.into()),
            U16 => Scalar::U64(text.parse::<u16>().ok()?.into()),
            U32 => Scalar::U64(text.parse::<u32>().ok()?.into()),
            U64 => Scalar::U64(text.parse().ok()?),
            USize => Scalar::U64(text.parse::<usize>().ok()? as u64),
            U128 => Scalar::U128(text.parse().ok()?),
            I8 => Scalar::I64(text.parse::<i8>().ok()?.into()),
            I16 => Scalar::I64(text.parse::<i16>().ok()?.into()),
            I32 => Scalar::I64(text.parse::<i32>().ok()?.into()),
            I64 => Scalar::I64(text.parse().ok()?),
            ISize => Scalar::I64(text.parse::<isize>().ok()? as i64),
            I128 => Scalar::I128(text.parse().ok()?),
        };
        Some(scalar)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::String => "String",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::USize => "usize",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::ISize => "isize",
        };
        f.write_str(name)
    }
}

/// A scalar value, borrowed when read through a [`crate::Peek`] and owned
/// when produced by a decoder.
///
/// Integers are widened to 64 bits (or kept at 128 bits); the owning type
/// narrows them back in [`crate::Formable::from_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar<'a> {
    /// A boolean.
    Bool(bool),
    /// A single character.
    Char(char),
    /// Text.
    Str(Cow<'a, str>),
    /// Any unsigned integer up to 64 bits.
    U64(u64),
    /// A 128-bit unsigned integer.
    U128(u128),
    /// Any signed integer up to 64 bits.
    I64(i64),
    /// A 128-bit signed integer.
    I128(i128),
    /// A 32-bit float.
    F32(f32),
    /// A 64-bit float.
    F64(f64),
}

impl Scalar<'_> {
    /// Detaches the scalar from any borrowed text.
    pub fn into_owned(self) -> Scalar<'static> {
        match self {
            Scalar::Bool(v) => Scalar::Bool(v),
            Scalar::Char(v) => Scalar::Char(v),
            Scalar::Str(v) => Scalar::Str(Cow::Owned(v.into_owned())),
            Scalar::U64(v) => Scalar::U64(v),
            Scalar::U128(v) => Scalar::U128(v),
            Scalar::I64(v) => Scalar::I64(v),
            Scalar::I128(v) => Scalar::I128(v),
            Scalar::F32(v) => Scalar::F32(v),
            Scalar::F64(v) => Scalar::F64(v),
        }
    }

    /// Short description of the variant, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "string",
            Scalar::U64(_) | Scalar::U128(_) => "unsigned integer",
            Scalar::I64(_) | Scalar::I128(_) => "signed integer",
            Scalar::F32(_) | Scalar::F64(_) => "float",
        }
    }
}

/// Renders the scalar as its wire text (before percent-encoding).
impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Char(v) => write!(f, "{v}"),
            Scalar::Str(v) => f.write_str(v),
            Scalar::U64(v) => write!(f, "{v}"),
            Scalar::U128(v) => write!(f, "{v}"),
            Scalar::I64(v) => write!(f, "{v}"),
            Scalar::I128(v) => write!(f, "{v}"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::F64(v) => write!(f, "{v}"),
        }
    }
}
