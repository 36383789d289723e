use std::collections::{BTreeMap, HashMap};
use core::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

use crate::{Def, Formable, MapDef, Peek, PeekMap, PeekMapIter, ReflectError, Shape, Value, shape_of};

fn entries_from_value<K: Formable, V: Formable>(
    value: Value,
    shape: &'static Shape,
) -> Result<impl Iterator<Item = Result<(K, V), ReflectError>>, ReflectError> {
    Ok(value.into_map(shape)?.into_iter().map(|(key, value)| {
        let key = K::from_value(Value::Scalar(key))?;
        let value = V::from_value(value)?;
        Ok((key, value))
    }))
}

impl<K, V, S> Formable for HashMap<K, V, S>
where
    K: Formable + Eq + Hash,
    V: Formable,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Map(MapDef::new(shape_of::<K>, shape_of::<V>))) };

    fn peek(&self) -> Peek<'_> {
        Peek::Map(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        entries_from_value(value, Self::SHAPE)?.collect()
    }
}

impl<K, V, S> PeekMap for HashMap<K, V, S>
where
    K: Formable,
    V: Formable,
{
    fn entries(&self) -> Result<PeekMapIter<'_>, ReflectError> {
        Ok(Box::new(self.iter().map(|(k, v)| (k.peek(), v.peek()))))
    }
}

impl<K, V> Formable for BTreeMap<K, V>
where
    K: Formable + Ord,
    V: Formable,
{
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Map(MapDef::new(shape_of::<K>, shape_of::<V>))) };

    fn peek(&self) -> Peek<'_> {
        Peek::Map(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        entries_from_value(value, Self::SHAPE)?.collect()
    }
}

impl<K, V> PeekMap for BTreeMap<K, V>
where
    K: Formable,
    V: Formable,
{
    fn entries(&self) -> Result<PeekMapIter<'_>, ReflectError> {
        Ok(Box::new(self.iter().map(|(k, v)| (k.peek(), v.peek()))))
    }
}

impl<K, V, S> Formable for IndexMap<K, V, S>
where
    K: Formable + Eq + Hash,
    V: Formable,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape =
        &const { Shape::of::<Self>(Def::Map(MapDef::new(shape_of::<K>, shape_of::<V>))) };

    fn peek(&self) -> Peek<'_> {
        Peek::Map(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        entries_from_value(value, Self::SHAPE)?.collect()
    }
}

impl<K, V, S> PeekMap for IndexMap<K, V, S>
where
    K: Formable,
    V: Formable,
{
    fn entries(&self) -> Result<PeekMapIter<'_>, ReflectError> {
        Ok(Box::new(self.iter().map(|(k, v)| (k.peek(), v.peek()))))
    }
}
