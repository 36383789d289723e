use std::collections::VecDeque;

use crate::{Def, Formable, ListDef, Peek, PeekList, ReflectError, Shape, Value, shape_of};

impl<T: Formable> Formable for Vec<T> {
    const SHAPE: &'static Shape = &const { Shape::of::<Self>(Def::List(ListDef::new(shape_of::<T>))) };

    fn peek(&self) -> Peek<'_> {
        Peek::List(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        value
            .into_list(Self::SHAPE)?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: Formable> PeekList for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn item(&self, index: usize) -> Option<Peek<'_>> {
        self.get(index).map(Formable::peek)
    }
}

impl<T: Formable> Formable for VecDeque<T> {
    const SHAPE: &'static Shape = &const { Shape::of::<Self>(Def::List(ListDef::new(shape_of::<T>))) };

    fn peek(&self) -> Peek<'_> {
        Peek::List(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        value
            .into_list(Self::SHAPE)?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: Formable> PeekList for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn item(&self, index: usize) -> Option<Peek<'_>> {
        self.get(index).map(Formable::peek)
    }
}
