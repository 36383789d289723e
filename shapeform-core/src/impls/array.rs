use crate::{ArrayDef, Def, Formable, Peek, PeekList, ReflectError, Shape, Value, shape_of};

impl<T: Formable, const N: usize> Formable for [T; N] {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Array(ArrayDef::new(shape_of::<T>, N))) };

    fn peek(&self) -> Peek<'_> {
        Peek::List(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        let items = value
            .into_list(Self::SHAPE)?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<Vec<T>, _>>()?;
        let actual = items.len();
        items.try_into().map_err(|_| ReflectError::LengthMismatch {
            shape: Self::SHAPE,
            expected: N,
            actual,
        })
    }
}

impl<T: Formable, const N: usize> PeekList for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn item(&self, index: usize) -> Option<Peek<'_>> {
        self.get(index).map(Formable::peek)
    }
}
