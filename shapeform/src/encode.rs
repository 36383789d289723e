//! Flattens a value into `(key path, token)` pairs.

use shapeform_core::{Loose, Peek, PeekList};

use crate::descriptor::TypeDescriptor;
use crate::{EncodeError, KeyPath, ListMode, Schema, Segment, codec};

/// One `key=value` pair, the token already encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Pair {
    pub(crate) path: KeyPath,
    pub(crate) token: String,
}

pub(crate) struct Encoder {
    list_mode: ListMode,
    pairs: Vec<Pair>,
}

impl Encoder {
    pub(crate) fn new(list_mode: ListMode) -> Self {
        Self {
            list_mode,
            pairs: Vec::new(),
        }
    }

    pub(crate) fn encode(
        mut self,
        peek: Peek<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Vec<Pair>, EncodeError> {
        self.value(peek, descriptor, &mut KeyPath::new(), false)?;
        Ok(self.pairs)
    }

    fn value(
        &mut self,
        peek: Peek<'_>,
        descriptor: &TypeDescriptor,
        path: &mut KeyPath,
        encoded: bool,
    ) -> Result<(), EncodeError> {
        match (descriptor, peek) {
            (_, Peek::Null) => Ok(()),
            (TypeDescriptor::Scalar(_), Peek::Scalar(scalar)) => {
                self.token(path, &scalar.to_string(), encoded)
            }
            (
                TypeDescriptor::List(element) | TypeDescriptor::Array { element, .. },
                Peek::List(list),
            ) => self.items(list, element, path, encoded),
            (TypeDescriptor::Map { value, .. }, Peek::Map(map)) => {
                let entries = map.entries().map_err(|error| EncodeError::Reflect {
                    path: path.clone(),
                    error,
                })?;
                for (key, entry) in entries {
                    path.push(map_key(key, path, "a scalar map key")?);
                    self.value(entry, value, path, encoded)?;
                    path.pop();
                }
                Ok(())
            }
            (TypeDescriptor::Record(record), Peek::Record(fields)) => {
                let schema = record.schema()?;
                self.record(fields.fields(), &schema, path)
            }
            (TypeDescriptor::Raw, Peek::Raw(loose)) => self.loose(loose, path, encoded),
            (descriptor, peek) => Err(EncodeError::ShapeMismatch {
                path: path.clone(),
                expected: descriptor.kind(),
                found: peek.kind(),
            }),
        }
    }

    /// Scalar items share the list's key in implicit mode; everything else
    /// gets an explicit index.
    fn items(
        &mut self,
        list: &dyn PeekList,
        element: &TypeDescriptor,
        path: &mut KeyPath,
        encoded: bool,
    ) -> Result<(), EncodeError> {
        let implicit = self.list_mode == ListMode::Implicit && element.is_scalar();
        for index in 0..list.len() {
            let Some(item) = list.item(index) else {
                return Err(EncodeError::ShapeMismatch {
                    path: path.clone(),
                    expected: "an item",
                    found: "nothing",
                });
            };
            if implicit {
                self.value(item, element, path, encoded)?;
            } else {
                path.push(Segment::Index(index));
                self.value(item, element, path, encoded)?;
                path.pop();
            }
        }
        Ok(())
    }

    fn record(
        &mut self,
        fields: Vec<Peek<'_>>,
        schema: &Schema,
        path: &mut KeyPath,
    ) -> Result<(), EncodeError> {
        if fields.len() != schema.field_count() {
            return Err(EncodeError::ShapeMismatch {
                path: path.clone(),
                expected: "one view per declared field",
                found: "a different number of fields",
            });
        }

        for field in schema.fields() {
            path.push(name(field.wire_key.to_owned(), path)?);
            self.value(fields[field.index].clone(), &field.descriptor, path, field.encoded)?;
            path.pop();
        }

        let Some(slot) = schema.additional() else {
            return Ok(());
        };
        match &fields[slot.index] {
            Peek::Null => Ok(()),
            Peek::Map(map) => {
                let entries = map.entries().map_err(|error| EncodeError::Reflect {
                    path: path.clone(),
                    error,
                })?;
                for (key, entry) in entries {
                    path.push(map_key(key, path, "a text key")?);
                    self.value(entry, &slot.value, path, false)?;
                    path.pop();
                }
                Ok(())
            }
            other => Err(EncodeError::ShapeMismatch {
                path: path.clone(),
                expected: "a map of additional properties",
                found: other.kind(),
            }),
        }
    }

    fn loose(&mut self, loose: &Loose, path: &mut KeyPath, encoded: bool) -> Result<(), EncodeError> {
        match loose {
            Loose::Text(text) => self.token(path, text, encoded),
            Loose::List(items) => {
                let implicit = self.list_mode == ListMode::Implicit
                    && items.iter().all(|item| matches!(item, Loose::Text(_)));
                for (index, item) in items.iter().enumerate() {
                    if implicit {
                        self.loose(item, path, encoded)?;
                    } else {
                        path.push(Segment::Index(index));
                        self.loose(item, path, encoded)?;
                        path.pop();
                    }
                }
                Ok(())
            }
            Loose::Map(entries) => {
                for (key, item) in entries {
                    path.push(name(key.clone(), path)?);
                    self.loose(item, path, encoded)?;
                    path.pop();
                }
                Ok(())
            }
        }
    }

    fn token(&mut self, path: &KeyPath, text: &str, encoded: bool) -> Result<(), EncodeError> {
        if path.is_empty() {
            return Err(EncodeError::ShapeMismatch {
                path: path.clone(),
                expected: "a record or a map",
                found: "a single value",
            });
        }
        let token = if encoded {
            text.to_owned()
        } else {
            codec::encode_token(text).into_owned()
        };
        self.pairs.push(Pair {
            path: path.clone(),
            token,
        });
        Ok(())
    }
}

fn map_key(key: Peek<'_>, path: &KeyPath, expected: &'static str) -> Result<Segment, EncodeError> {
    match key {
        Peek::Scalar(key) => name(key.to_string(), path),
        other => Err(EncodeError::ShapeMismatch {
            path: path.clone(),
            expected,
            found: other.kind(),
        }),
    }
}

/// A name segment. Keys are percent-decoded before their brackets are split,
/// so a bracket inside a name cannot be read back.
fn name(key: String, path: &KeyPath) -> Result<Segment, EncodeError> {
    if key.contains(['[', ']']) {
        return Err(EncodeError::BracketInKey {
            path: path.clone(),
            key,
        });
    }
    Ok(Segment::Name(key))
}

/// Joins pairs into `key=value&key=value`.
pub(crate) fn join(pairs: &[Pair]) -> String {
    let mut out = String::new();
    for (position, pair) in pairs.iter().enumerate() {
        if position > 0 {
            out.push('&');
        }
        out.push_str(&pair.path.render());
        out.push('=');
        out.push_str(&pair.token);
    }
    out
}
