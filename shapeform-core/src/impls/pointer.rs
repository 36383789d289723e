use std::sync::Arc;

use crate::{Def, Formable, Peek, PointerDef, ReflectError, Shape, Value, shape_of};

impl<T: Formable> Formable for Box<T> {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Pointer(PointerDef::new(shape_of::<T>))) };

    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        T::from_value(value).map(Box::new)
    }
}

impl<T: Formable> Formable for Arc<T> {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Pointer(PointerDef::new(shape_of::<T>))) };

    fn peek(&self) -> Peek<'_> {
        (**self).peek()
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        T::from_value(value).map(Arc::new)
    }
}
