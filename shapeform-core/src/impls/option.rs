use crate::{Def, Formable, OptionDef, Peek, ReflectError, Shape, Value, shape_of};

impl<T: Formable> Formable for Option<T> {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Option(OptionDef::new(shape_of::<T>))) };

    fn peek(&self) -> Peek<'_> {
        match self {
            Some(inner) => inner.peek(),
            None => Peek::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        T::from_value(value).map(Some)
    }
}
