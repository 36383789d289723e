//! Shape -> [`TypeDescriptor`] resolution, cached per type.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use shapeform_core::{Def, ScalarKind, Shape, ShapeId};
use tracing::debug;

use crate::{Schema, SchemaError, schema};

static DESCRIPTORS: LazyLock<RwLock<HashMap<ShapeId, Arc<TypeDescriptor>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// How values of a type are laid out on the wire.
///
/// `Option`, `Box` and `Arc` are transparent and resolve to what they wrap.
#[derive(Debug)]
pub enum TypeDescriptor {
    /// A single token.
    Scalar(ScalarKind),
    /// A fixed number of items.
    Array {
        /// The items.
        element: Arc<TypeDescriptor>,
        /// How many there must be.
        len: usize,
    },
    /// Any number of items.
    List(Arc<TypeDescriptor>),
    /// Entries under scalar keys.
    Map {
        /// Kind of the keys.
        key: ScalarKind,
        /// The values.
        value: Arc<TypeDescriptor>,
    },
    /// A record, looked up lazily so records may contain themselves.
    Record(SchemaRef),
    /// Untyped text, lists and maps.
    Raw,
}

impl TypeDescriptor {
    /// Returns true for descriptors written as a single token.
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeDescriptor::Scalar(_))
    }

    /// Short name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDescriptor::Scalar(_) => "a scalar",
            TypeDescriptor::Array { .. } => "an array",
            TypeDescriptor::List(_) => "a list",
            TypeDescriptor::Map { .. } => "a map",
            TypeDescriptor::Record(_) => "a record",
            TypeDescriptor::Raw => "a raw container",
        }
    }
}

/// A record type whose [`Schema`] is built on first use.
#[derive(Clone, Copy)]
pub struct SchemaRef {
    shape: &'static Shape,
}

impl SchemaRef {
    /// The record's shape.
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// The record's schema.
    pub fn schema(&self) -> Result<Arc<Schema>, SchemaError> {
        schema::schema_of(self.shape)
    }
}

impl core::fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SchemaRef({})", self.shape)
    }
}

/// Resolves the descriptor for `shape`.
///
/// Results are cached per type for the life of the process. Failures are not
/// cached.
pub fn resolve(shape: &'static Shape) -> Result<Arc<TypeDescriptor>, SchemaError> {
    let cached = DESCRIPTORS.read().get(&shape.id()).cloned();
    if let Some(descriptor) = cached {
        return Ok(descriptor);
    }

    let descriptor = match shape.def {
        Def::Scalar(kind) => Arc::new(TypeDescriptor::Scalar(kind)),
        Def::Option(def) => resolve(def.t())?,
        Def::Pointer(def) => resolve(def.t())?,
        Def::List(def) => Arc::new(TypeDescriptor::List(resolve(def.t())?)),
        Def::Array(def) => Arc::new(TypeDescriptor::Array {
            element: resolve(def.t())?,
            len: def.n,
        }),
        Def::Map(def) => {
            let Def::Scalar(key) = def.k().def else {
                return Err(SchemaError::UnsupportedShape {
                    shape,
                    reason: "map keys must be scalars",
                });
            };
            Arc::new(TypeDescriptor::Map {
                key,
                value: resolve(def.v())?,
            })
        }
        Def::Record(_) => Arc::new(TypeDescriptor::Record(SchemaRef { shape })),
        Def::Raw => Arc::new(TypeDescriptor::Raw),
        _ => {
            return Err(SchemaError::UnsupportedShape {
                shape,
                reason: "it has no form representation",
            });
        }
    };

    debug!(shape = %shape, kind = descriptor.kind(), "resolved type descriptor");
    Ok(DESCRIPTORS
        .write()
        .entry(shape.id())
        .or_insert(descriptor)
        .clone())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use shapeform_core::{Formable, Loose};
    use shapeform_testhelpers::test;

    #[test]
    fn wrappers_are_transparent() {
        let inner = resolve(<u16 as Formable>::SHAPE).unwrap();
        let wrapped = resolve(<Option<Box<u16>> as Formable>::SHAPE).unwrap();
        assert!(matches!(*wrapped, TypeDescriptor::Scalar(ScalarKind::U16)));
        assert!(Arc::ptr_eq(&inner, &wrapped));
    }

    #[test]
    fn containers_nest() {
        let descriptor = resolve(<BTreeMap<u8, [Vec<Loose>; 2]> as Formable>::SHAPE).unwrap();
        let TypeDescriptor::Map { key, value } = &*descriptor else {
            panic!("expected a map, got {descriptor:?}");
        };
        assert_eq!(*key, ScalarKind::U8);
        let TypeDescriptor::Array { element, len: 2 } = &**value else {
            panic!("expected an array of two, got {value:?}");
        };
        assert!(matches!(&**element, TypeDescriptor::List(raw) if matches!(**raw, TypeDescriptor::Raw)));
    }

    #[test]
    fn repeated_resolution_is_shared() {
        let first = resolve(<Vec<i64> as Formable>::SHAPE).unwrap();
        let second = resolve(<Vec<i64> as Formable>::SHAPE).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn container_keys_are_rejected() {
        let err = resolve(<BTreeMap<Vec<u8>, u8> as Formable>::SHAPE).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedShape { .. }), "{err}");
    }

    #[test]
    fn opaque_types_are_rejected() {
        let err = resolve(<Vec<()> as Formable>::SHAPE).unwrap_err();
        let SchemaError::UnsupportedShape { shape, .. } = err else {
            panic!("expected UnsupportedShape, got {err:?}");
        };
        assert!(shape.is_type::<()>());
    }
}
