use std::borrow::Cow;

use crate::{Formable, Peek, ReflectError, Scalar, ScalarKind, Shape, Value};

fn out_of_range(shape: &'static Shape, value: impl ToString) -> ReflectError {
    ReflectError::OutOfRange {
        shape,
        value: value.to_string(),
    }
}

fn wrong_scalar(shape: &'static Shape, scalar: &Scalar<'_>) -> ReflectError {
    ReflectError::WrongShape {
        shape,
        actual: scalar.describe(),
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Formable for $ty {
            const SHAPE: &'static Shape = &const { Shape::scalar::<$ty>(ScalarKind::$kind) };

            fn peek(&self) -> Peek<'_> {
                Peek::Scalar(Scalar::U64(*self as u64))
            }

            fn from_value(value: Value) -> Result<Self, ReflectError> {
                match value.into_scalar(Self::SHAPE)? {
                    Scalar::U64(v) => <$ty>::try_from(v).map_err(|_| out_of_range(Self::SHAPE, v)),
                    other => Err(wrong_scalar(Self::SHAPE, &other)),
                }
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Formable for $ty {
            const SHAPE: &'static Shape = &const { Shape::scalar::<$ty>(ScalarKind::$kind) };

            fn peek(&self) -> Peek<'_> {
                Peek::Scalar(Scalar::I64(*self as i64))
            }

            fn from_value(value: Value) -> Result<Self, ReflectError> {
                match value.into_scalar(Self::SHAPE)? {
                    Scalar::I64(v) => <$ty>::try_from(v).map_err(|_| out_of_range(Self::SHAPE, v)),
                    other => Err(wrong_scalar(Self::SHAPE, &other)),
                }
            }
        }
    )*};
}

impl_unsigned!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => USize);
impl_signed!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => ISize);

impl Formable for u128 {
    const SHAPE: &'static Shape = &const { Shape::scalar::<u128>(ScalarKind::U128) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::U128(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::U128(v) => Ok(v),
            Scalar::U64(v) => Ok(v.into()),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for i128 {
    const SHAPE: &'static Shape = &const { Shape::scalar::<i128>(ScalarKind::I128) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::I128(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::I128(v) => Ok(v),
            Scalar::I64(v) => Ok(v.into()),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for f32 {
    const SHAPE: &'static Shape = &const { Shape::scalar::<f32>(ScalarKind::F32) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::F32(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::F32(v) => Ok(v),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for f64 {
    const SHAPE: &'static Shape = &const { Shape::scalar::<f64>(ScalarKind::F64) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::F64(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::F64(v) => Ok(v),
            Scalar::F32(v) => Ok(v.into()),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for bool {
    const SHAPE: &'static Shape = &const { Shape::scalar::<bool>(ScalarKind::Bool) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::Bool(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::Bool(v) => Ok(v),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for char {
    const SHAPE: &'static Shape = &const { Shape::scalar::<char>(ScalarKind::Char) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::Char(*self))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::Char(v) => Ok(v),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}

impl Formable for String {
    const SHAPE: &'static Shape = &const { Shape::scalar::<String>(ScalarKind::String) };

    fn peek(&self) -> Peek<'_> {
        Peek::Scalar(Scalar::Str(Cow::Borrowed(self)))
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value.into_scalar(Self::SHAPE)? {
            Scalar::Str(v) => Ok(v.into_owned()),
            other => Err(wrong_scalar(Self::SHAPE, &other)),
        }
    }
}
