use crate::{Formable, Loose, ReflectError, Scalar, Shape};

/// An owned value tree, built by a decoder against a shape and consumed by
/// [`Formable::from_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A scalar, already converted to the kind the shape asks for.
    Scalar(Scalar<'static>),
    /// Items of a list or array, in order.
    List(Vec<Value>),
    /// Entries of a map, in wire order.
    Map(Vec<(Scalar<'static>, Value)>),
    /// Fields of a record, one slot per declared field.
    Record(Vec<Option<Value>>),
    /// An untyped container.
    Raw(Loose),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(scalar) => scalar.describe(),
            Value::List(_) => "a list",
            Value::Map(_) => "a map",
            Value::Record(_) => "a record",
            Value::Raw(_) => "a raw value",
        }
    }

    /// Unwraps a scalar, or reports what was found instead.
    pub fn into_scalar(self, shape: &'static Shape) -> Result<Scalar<'static>, ReflectError> {
        match self {
            Value::Scalar(scalar) => Ok(scalar),
            other => Err(ReflectError::WrongShape {
                shape,
                actual: other.kind(),
            }),
        }
    }

    /// Unwraps list items, or reports what was found instead.
    pub fn into_list(self, shape: &'static Shape) -> Result<Vec<Value>, ReflectError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(ReflectError::WrongShape {
                shape,
                actual: other.kind(),
            }),
        }
    }

    /// Unwraps map entries, or reports what was found instead.
    pub fn into_map(
        self,
        shape: &'static Shape,
    ) -> Result<Vec<(Scalar<'static>, Value)>, ReflectError> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(ReflectError::WrongShape {
                shape,
                actual: other.kind(),
            }),
        }
    }

    /// Unwraps record fields, or reports what was found instead.
    pub fn into_record(self, shape: &'static Shape) -> Result<RecordFields, ReflectError> {
        match self {
            Value::Record(fields) => Ok(RecordFields {
                fields: fields.into_iter(),
            }),
            other => Err(ReflectError::WrongShape {
                shape,
                actual: other.kind(),
            }),
        }
    }
}

/// Field values of a record, handed out in declaration order.
pub struct RecordFields {
    fields: std::vec::IntoIter<Option<Value>>,
}

impl RecordFields {
    /// Takes the next field, falling back to `T::default()` when it was absent.
    pub fn next_field<T: Formable + Default>(&mut self) -> Result<T, ReflectError> {
        match self.fields.next().flatten() {
            Some(value) => T::from_value(value),
            None => Ok(T::default()),
        }
    }
}
