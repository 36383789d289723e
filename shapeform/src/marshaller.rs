use std::sync::Arc;

use shapeform_core::{Def, Formable, Shape};
use tracing::debug;

use crate::descriptor::{self, TypeDescriptor};
use crate::encode::{self, Encoder};
use crate::{DecodeError, EncodeError, Schema, SchemaError, decode::Decoder, schema, tree};

/// How list items are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListMode {
    /// Scalar items repeat the list's key: `n=1&n=2`.
    #[default]
    Implicit,
    /// Every item carries its index: `n[0]=1&n[1]=2`.
    Explicit,
}

/// What decoding does with a key that matches no field of a record without
/// an additional-properties slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnknownFieldPolicy {
    /// Fail with [`DecodeError::UnknownField`].
    Fail,
    /// Drop the key and carry on.
    #[default]
    Ignore,
}

/// Converts values to and from `application/x-www-form-urlencoded` text.
///
/// A `Marshaller` only holds options; type information is cached globally,
/// so instances are cheap to create and safe to share between threads.
///
/// ```
/// use shapeform::{ListMode, Marshaller, record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Query {
///     q: String,
///     page: u32,
///     tags: Vec<String>,
/// }
///
/// record!(Query { q: String, page: u32, tags: Vec<String> });
///
/// let query = Query { q: "rust lang".into(), page: 2, tags: vec!["a".into(), "b".into()] };
///
/// let implicit = Marshaller::new();
/// assert_eq!(implicit.marshal(&query).unwrap(), "q=rust+lang&page=2&tags=a&tags=b");
///
/// let explicit = Marshaller::new().with_list_mode(ListMode::Explicit);
/// let text = explicit.marshal(&query).unwrap();
/// assert_eq!(text, "q=rust+lang&page=2&tags[0]=a&tags[1]=b");
/// assert_eq!(implicit.unmarshal::<Query>(&text).unwrap(), query);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Marshaller {
    list_mode: ListMode,
    unknown_fields: UnknownFieldPolicy,
}

impl Marshaller {
    /// Implicit lists, ignoring unknown fields.
    pub const fn new() -> Self {
        Self {
            list_mode: ListMode::Implicit,
            unknown_fields: UnknownFieldPolicy::Ignore,
        }
    }

    /// Sets how list items are written. Decoding accepts both forms either way.
    pub const fn with_list_mode(mut self, list_mode: ListMode) -> Self {
        self.list_mode = list_mode;
        self
    }

    /// Sets what decoding does with unmatched keys.
    pub const fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// The configured list mode.
    pub const fn list_mode(&self) -> ListMode {
        self.list_mode
    }

    /// The configured unknown-field policy.
    pub const fn unknown_fields(&self) -> UnknownFieldPolicy {
        self.unknown_fields
    }

    /// Writes `value` as form data.
    ///
    /// Fields are written in declaration order, followed by the entries of
    /// the additional-properties slot. A top-level `None` writes nothing.
    pub fn marshal<T: Formable>(&self, value: &T) -> Result<String, EncodeError> {
        let descriptor = top_level(T::SHAPE)?;
        let pairs = Encoder::new(self.list_mode).encode(value.peek(), &descriptor)?;
        debug!(shape = %T::SHAPE, pairs = pairs.len(), "marshalled");
        Ok(encode::join(&pairs))
    }

    /// Reads form data into a `T`.
    ///
    /// Fields absent from the input take their default value.
    pub fn unmarshal<T: Formable>(&self, input: &str) -> Result<T, DecodeError> {
        let descriptor = top_level(T::SHAPE)?;
        let tree = tree::build(input)?;
        let value = Decoder::new(self.unknown_fields).decode(&tree, &descriptor)?;
        Ok(T::from_value(value)?)
    }

    /// The schema of record type `T`.
    pub fn schema_of<T: Formable>(&self) -> Result<Arc<Schema>, SchemaError> {
        schema::schema_of(T::SHAPE)
    }
}

/// Resolves a type usable at the top level: a record, a map or a raw
/// container, possibly behind `Option`, `Box` or `Arc`.
fn top_level(shape: &'static Shape) -> Result<Arc<TypeDescriptor>, SchemaError> {
    let descriptor = descriptor::resolve(shape)?;
    match &*descriptor {
        TypeDescriptor::Record(record) => {
            // surface schema errors before any data is touched
            record.schema()?;
        }
        TypeDescriptor::Map { .. } | TypeDescriptor::Raw => {}
        _ => {
            return Err(SchemaError::UnsupportedShape {
                shape,
                reason: match shape.def {
                    Def::Scalar(_) => "a single value has no key to travel under",
                    _ => "only records, maps and raw containers can be written at the top level",
                },
            });
        }
    }
    Ok(descriptor)
}
