use core::fmt;

use crate::{Field, ScalarKind, Shape, ShapeRef};

/// What a shape is made of, as far as the wire is concerned.
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum Def {
    /// A single token.
    ///
    /// e.g. `u32`, `String`, `bool`
    Scalar(ScalarKind),

    /// Optional value, absent when `None`.
    ///
    /// e.g. `Option<T>`
    Option(OptionDef),

    /// Owning pointer that is transparent on the wire.
    ///
    /// e.g. `Box<T>`, `Arc<T>`
    Pointer(PointerDef),

    /// Any number of items of one type.
    ///
    /// e.g. `Vec<T>`, `VecDeque<T>`
    List(ListDef),

    /// A fixed number of items of one type.
    ///
    /// e.g. `[T; 3]`
    Array(ArrayDef),

    /// Entries under scalar keys, all values of one type.
    ///
    /// e.g. `HashMap<String, T>`, `IndexMap<u32, T>`
    Map(MapDef),

    /// Record with named fields.
    Record(RecordDef),

    /// Untyped container whose leaves are text.
    ///
    /// e.g. [`crate::Loose`]
    Raw,

    /// A type with no form representation (function pointers, `()`, ...).
    Opaque,
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Scalar(kind) => write!(f, "Scalar({kind})"),
            Def::Option(def) => write!(f, "Option<{}>", def.t()),
            Def::Pointer(def) => write!(f, "Pointer<{}>", def.t()),
            Def::List(def) => write!(f, "List<{}>", def.t()),
            Def::Array(def) => write!(f, "Array<{}; {}>", def.t(), def.n),
            Def::Map(def) => write!(f, "Map<{}, {}>", def.k(), def.v()),
            Def::Record(def) => write!(f, "Record({} fields)", def.fields.len()),
            Def::Raw => write!(f, "Raw"),
            Def::Opaque => write!(f, "Opaque"),
        }
    }
}

/// Definition of an `Option<T>`-like shape.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// shape of the inner value
    pub t: ShapeRef,
}

impl OptionDef {
    /// Construct an `OptionDef` from the inner shape.
    pub const fn new(t: ShapeRef) -> Self {
        Self { t }
    }

    /// Returns the shape of the inner value
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Definition of a transparent owning pointer.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// shape of the pointee
    pub t: ShapeRef,
}

impl PointerDef {
    /// Construct a `PointerDef` from the pointee shape.
    pub const fn new(t: ShapeRef) -> Self {
        Self { t }
    }

    /// Returns the shape of the pointee
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Fields for list types
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// shape of the items in the list
    pub t: ShapeRef,
}

impl ListDef {
    /// Construct a `ListDef` from its element shape.
    pub const fn new(t: ShapeRef) -> Self {
        Self { t }
    }

    /// Returns the shape of the items in the list
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Fields for fixed-size array types
#[derive(Clone, Copy, Debug)]
pub struct ArrayDef {
    /// shape of the items in the array
    pub t: ShapeRef,

    /// number of items
    pub n: usize,
}

impl ArrayDef {
    /// Construct an `ArrayDef` from its element shape and length.
    pub const fn new(t: ShapeRef, n: usize) -> Self {
        Self { t, n }
    }

    /// Returns the shape of the items in the array
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Fields for map types
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the keys
    pub k: ShapeRef,

    /// shape of the values
    pub v: ShapeRef,
}

impl MapDef {
    /// Construct a `MapDef` from its key and value shapes.
    pub const fn new(k: ShapeRef, v: ShapeRef) -> Self {
        Self { k, v }
    }

    /// Returns the shape of the keys
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Returns the shape of the values
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}

/// Fields for record types
#[derive(Clone, Copy, Debug)]
pub struct RecordDef {
    /// declared fields, in declaration order
    pub fields: &'static [Field],
}

impl RecordDef {
    /// Construct a `RecordDef` from its fields.
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }
}
