#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use shapeform_core::*;

pub mod codec;

mod key_path;
pub use key_path::{KeyPath, Segment};

mod error;
pub use error::*;

mod descriptor;
pub use descriptor::{SchemaRef, TypeDescriptor, resolve};

mod schema;
pub use schema::{AdditionalPropertiesSlot, FieldMapping, Schema, schema_of};

mod encode;
mod tree;
mod decode;

mod marshaller;
pub use marshaller::*;

/// Writes `value` as form data with the default [`Marshaller`].
pub fn to_string<T: Formable>(value: &T) -> Result<String, EncodeError> {
    Marshaller::new().marshal(value)
}

/// Reads form data into a `T` with the default [`Marshaller`].
pub fn from_str<T: Formable>(input: &str) -> Result<T, DecodeError> {
    Marshaller::new().unmarshal(input)
}
