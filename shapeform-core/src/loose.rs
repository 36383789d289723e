use indexmap::IndexMap;

use crate::{Def, Formable, Peek, ReflectError, Scalar, Shape, Value};

/// An untyped form value: text leaves, nested in lists and string-keyed maps.
///
/// Fields declared as `Loose` carry no element information, so a decoder
/// keeps every leaf as text and only builds nested lists or maps when the
/// wire keys have further brackets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Loose {
    /// A single token.
    Text(String),
    /// Ordered items.
    List(Vec<Loose>),
    /// Entries keyed by text, in first-seen order.
    Map(IndexMap<String, Loose>),
}

impl Loose {
    /// Returns the text if this is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Loose::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the items if this is a list.
    pub fn as_list(&self) -> Option<&[Loose]> {
        match self {
            Loose::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, Loose>> {
        match self {
            Loose::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// An empty map, which writes nothing.
impl Default for Loose {
    fn default() -> Self {
        Loose::Map(IndexMap::new())
    }
}

impl From<&str> for Loose {
    fn from(text: &str) -> Self {
        Loose::Text(text.to_owned())
    }
}

impl From<String> for Loose {
    fn from(text: String) -> Self {
        Loose::Text(text)
    }
}

impl Formable for Loose {
    const SHAPE: &'static Shape = &const { Shape::of::<Loose>(Def::Raw) };

    fn peek(&self) -> Peek<'_> {
        Peek::Raw(self)
    }

    fn from_value(value: Value) -> Result<Self, ReflectError> {
        match value {
            Value::Raw(loose) => Ok(loose),
            Value::Scalar(Scalar::Str(text)) => Ok(Loose::Text(text.into_owned())),
            other => Err(ReflectError::WrongShape {
                shape: Self::SHAPE,
                actual: other.kind(),
            }),
        }
    }
}
