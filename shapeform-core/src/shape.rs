use core::any::TypeId;
use core::fmt;

use crate::{Def, ScalarKind};

/// A shape reached through a function call, so records can contain themselves.
pub type ShapeRef = fn() -> &'static Shape;

/// Identity of a shape, derived from the [`TypeId`] of the type it describes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ShapeId(TypeId);

/// Static description of a type: its identity, its name, and its [`Def`].
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Returns the `TypeId` of the described type.
    pub type_id: fn() -> TypeId,

    /// Returns the fully-qualified name of the described type.
    pub type_name: fn() -> &'static str,

    /// What the type is made of.
    pub def: Def,
}

impl Shape {
    /// Builds the shape of `T` from its definition.
    pub const fn of<T: 'static>(def: Def) -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
            def,
        }
    }

    /// Shorthand for a scalar shape.
    pub const fn scalar<T: 'static>(kind: ScalarKind) -> Self {
        Self::of::<T>(Def::Scalar(kind))
    }

    /// Identity of this shape.
    #[inline]
    pub fn id(&self) -> ShapeId {
        ShapeId((self.type_id)())
    }

    /// Fully-qualified name of the described type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Returns true if this shape describes `T`.
    #[inline]
    pub fn is_type<T: 'static>(&self) -> bool {
        (self.type_id)() == TypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
