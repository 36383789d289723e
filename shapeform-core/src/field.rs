use bitflags::bitflags;

use crate::{Shape, ShapeRef};

bitflags! {
    /// Flags that change how a field travels on the wire.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u8 {
        /// The field's text is already in final wire form: it is emitted
        /// verbatim and never percent-decoded.
        const ENCODED = 1 << 0;

        /// The field is a map collecting every key no other field claims.
        const ADDITIONAL = 1 << 1;
    }
}

/// Describes a field in a record
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// name of the field in the Rust type
    pub name: &'static str,

    /// wire key, when it differs from `name`
    pub rename: Option<&'static str>,

    /// shape of the inner type
    pub shape: ShapeRef,

    /// wire behavior flags
    pub flags: FieldFlags,
}

impl Field {
    /// Declares a field with the given name and shape.
    pub const fn new(name: &'static str, shape: ShapeRef) -> Self {
        Self {
            name,
            rename: None,
            shape,
            flags: FieldFlags::empty(),
        }
    }

    /// Maps the field to a different wire key.
    pub const fn rename(mut self, key: &'static str) -> Self {
        self.rename = Some(key);
        self
    }

    /// Marks the field as already wire-encoded.
    pub const fn encoded(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::ENCODED);
        self
    }

    /// Marks the field as the additional-properties container.
    pub const fn additional(mut self) -> Self {
        self.flags = self.flags.union(FieldFlags::ADDITIONAL);
        self
    }

    /// The key this field is written under.
    #[inline]
    pub fn wire_key(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }

    /// Returns the shape of the inner type
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Returns true if the field holds pre-encoded wire text.
    #[inline]
    pub fn is_encoded(&self) -> bool {
        self.flags.contains(FieldFlags::ENCODED)
    }

    /// Returns true if the field collects unmatched keys.
    #[inline]
    pub fn is_additional(&self) -> bool {
        self.flags.contains(FieldFlags::ADDITIONAL)
    }
}
