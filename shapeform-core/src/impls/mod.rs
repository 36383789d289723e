//! [`crate::Formable`] implementations for standard library types.

mod scalar;

mod option;

mod pointer;

mod list;

mod array;

mod map;

mod opaque;
