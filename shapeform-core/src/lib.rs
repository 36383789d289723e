#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod shape;
pub use shape::*;

mod def;
pub use def::*;

mod field;
pub use field::*;

mod scalar;
pub use scalar::*;

mod peek;
pub use peek::*;

mod value;
pub use value::*;

mod error;
pub use error::*;

mod loose;
pub use loose::*;

mod impls;

mod macros;

/// Allows a type to be described by a static [`Shape`], read through a
/// [`Peek`], and rebuilt from an owned [`Value`].
///
/// Implementations exist for the primitive scalars, `String`, `Option`,
/// `Box`, `Arc`, `Vec`, `VecDeque`, fixed-size arrays, `HashMap`, `BTreeMap`
/// and `IndexMap`. Records are usually declared through [`record!`].
pub trait Formable: Sized + 'static {
    /// The static description of this type.
    const SHAPE: &'static Shape;

    /// Returns a read-only view of this value.
    fn peek(&self) -> Peek<'_>;

    /// Rebuilds a value from a tree produced against [`Self::SHAPE`].
    fn from_value(value: Value) -> Result<Self, ReflectError>;
}

/// Returns the shape of `T`.
///
/// Used as a `fn() -> &'static Shape` pointer inside shape declarations, which
/// keeps cyclic types expressible.
pub fn shape_of<T: Formable>() -> &'static Shape {
    T::SHAPE
}
