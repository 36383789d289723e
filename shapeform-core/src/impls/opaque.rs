use crate::{Def, Formable, Peek, ReflectError, Shape, Value};

/// `()` has no form representation; resolving it is an error.
impl Formable for () {
    const SHAPE: &'static Shape = &const { Shape::of::<()>(Def::Opaque) };

    fn peek(&self) -> Peek<'_> {
        Peek::Null
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        Err(ReflectError::WrongShape {
            shape: Self::SHAPE,
            actual: value.kind(),
        })
    }
}

/// Function pointers have no form representation either.
impl<R: 'static> Formable for fn() -> R {
    const SHAPE: &'static Shape = &const { Shape::of::<Self>(Def::Opaque) };

    fn peek(&self) -> Peek<'_> {
        Peek::Null
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        Err(ReflectError::WrongShape {
            shape: Self::SHAPE,
            actual: value.kind(),
        })
    }
}
