//! Rebuilds typed values from a [`ValueNode`] tree.

use std::borrow::Cow;

use indexmap::IndexMap;
use shapeform_core::{Loose, Scalar, ScalarKind, Value};
use tracing::trace;

use crate::descriptor::TypeDescriptor;
use crate::tree::ValueNode;
use crate::{DecodeError, KeyPath, Schema, Segment, UnknownFieldPolicy, codec};

pub(crate) struct Decoder {
    unknown_fields: UnknownFieldPolicy,
}

impl Decoder {
    pub(crate) fn new(unknown_fields: UnknownFieldPolicy) -> Self {
        Self { unknown_fields }
    }

    pub(crate) fn decode(
        &self,
        node: &ValueNode<'_>,
        descriptor: &TypeDescriptor,
    ) -> Result<Value, DecodeError> {
        self.node(node, descriptor, &mut KeyPath::new(), false)
    }

    fn node(
        &self,
        node: &ValueNode<'_>,
        descriptor: &TypeDescriptor,
        path: &mut KeyPath,
        encoded: bool,
    ) -> Result<Value, DecodeError> {
        match descriptor {
            TypeDescriptor::Scalar(kind) => self.scalar(node, *kind, path, encoded),
            TypeDescriptor::List(element) => {
                Ok(Value::List(self.items(node, element, path, encoded)?))
            }
            TypeDescriptor::Array { element, len } => {
                let items = self.items(node, element, path, encoded)?;
                if items.len() != *len {
                    return Err(DecodeError::ValueConversion {
                        path: path.clone(),
                        token: None,
                        expected: format!("exactly {len} items (found {})", items.len()),
                    });
                }
                Ok(Value::List(items))
            }
            TypeDescriptor::Map { key, value } => self.map(node, *key, value, path, encoded),
            TypeDescriptor::Record(record) => {
                let schema = record.schema()?;
                self.record(node, &schema, path)
            }
            TypeDescriptor::Raw => Ok(Value::Raw(loose(node, encoded))),
        }
    }

    fn scalar(
        &self,
        node: &ValueNode<'_>,
        kind: ScalarKind,
        path: &KeyPath,
        encoded: bool,
    ) -> Result<Value, DecodeError> {
        let ValueNode::Leaf(tokens) = node else {
            return Err(DecodeError::ValueConversion {
                path: path.clone(),
                token: None,
                expected: format!("a single {kind}"),
            });
        };
        // a repeated key addressing a single value: the last one wins
        let text = text(tokens.last().copied().unwrap_or_default(), encoded);
        match kind.parse(&text) {
            Some(scalar) => Ok(Value::Scalar(scalar)),
            None => Err(DecodeError::ValueConversion {
                path: path.clone(),
                token: Some(text.into_owned()),
                expected: kind.to_string(),
            }),
        }
    }

    /// Accepts repeated keys as well as indexed children; indices need not be
    /// contiguous and only their order is kept.
    fn items(
        &self,
        node: &ValueNode<'_>,
        element: &TypeDescriptor,
        path: &mut KeyPath,
        encoded: bool,
    ) -> Result<Vec<Value>, DecodeError> {
        match node {
            ValueNode::Leaf(tokens) => tokens
                .iter()
                .enumerate()
                .map(|(position, token)| {
                    path.push(Segment::Index(position));
                    let item = self.node(&ValueNode::Leaf(vec![*token]), element, path, encoded);
                    path.pop();
                    item
                })
                .collect(),
            ValueNode::Indexed(children) => children
                .iter()
                .map(|(index, child)| {
                    path.push(Segment::Index(*index));
                    let item = self.node(child, element, path, encoded);
                    path.pop();
                    item
                })
                .collect(),
            ValueNode::Keyed(_) => Err(DecodeError::ValueConversion {
                path: path.clone(),
                token: None,
                expected: "a list".to_owned(),
            }),
        }
    }

    /// Accepts named children, and indexed ones whose indices become keys.
    fn map(
        &self,
        node: &ValueNode<'_>,
        key_kind: ScalarKind,
        value: &TypeDescriptor,
        path: &mut KeyPath,
        encoded: bool,
    ) -> Result<Value, DecodeError> {
        let children: Vec<(Segment, Cow<'_, str>, &ValueNode<'_>)> = match node {
            ValueNode::Keyed(children) => children
                .iter()
                .map(|(key, child)| (Segment::Name(key.clone()), Cow::Borrowed(key.as_str()), child))
                .collect(),
            ValueNode::Indexed(children) => children
                .iter()
                .map(|(index, child)| (Segment::Index(*index), Cow::Owned(index.to_string()), child))
                .collect(),
            ValueNode::Leaf(tokens) => {
                return Err(DecodeError::ValueConversion {
                    path: path.clone(),
                    token: tokens.last().map(|token| text(token, encoded).into_owned()),
                    expected: "a map".to_owned(),
                });
            }
        };

        let mut entries = Vec::with_capacity(children.len());
        for (segment, key, child) in children {
            path.push(segment);
            let Some(key) = key_kind.parse(&key) else {
                return Err(DecodeError::ValueConversion {
                    path: path.clone(),
                    token: Some(key.into_owned()),
                    expected: format!("a {key_kind} map key"),
                });
            };
            entries.push((key, self.node(child, value, path, encoded)?));
            path.pop();
        }
        Ok(Value::Map(entries))
    }

    fn record(
        &self,
        node: &ValueNode<'_>,
        schema: &Schema,
        path: &mut KeyPath,
    ) -> Result<Value, DecodeError> {
        let children = match node {
            ValueNode::Keyed(children) => children,
            ValueNode::Indexed(_) => {
                return Err(DecodeError::ValueConversion {
                    path: path.clone(),
                    token: None,
                    expected: format!("a `{}` record", schema.owner()),
                });
            }
            ValueNode::Leaf(tokens) => {
                return Err(DecodeError::ValueConversion {
                    path: path.clone(),
                    token: tokens.last().map(|token| codec::decode_token(token).into_owned()),
                    expected: format!("a `{}` record", schema.owner()),
                });
            }
        };

        let mut fields: Vec<Option<Value>> = vec![None; schema.field_count()];
        let mut additional = Vec::new();
        for (key, child) in children {
            path.push(Segment::Name(key.clone()));
            if let Some(field) = schema.field(key) {
                fields[field.index] = Some(self.node(child, &field.descriptor, path, field.encoded)?);
            } else if let Some(slot) = schema.additional() {
                let value = self.node(child, &slot.value, path, false)?;
                additional.push((Scalar::Str(Cow::Owned(key.clone())), value));
            } else {
                match self.unknown_fields {
                    UnknownFieldPolicy::Fail => {
                        return Err(DecodeError::UnknownField { path: path.clone() });
                    }
                    UnknownFieldPolicy::Ignore => {
                        trace!(path = %path, record = %schema.owner(), "ignoring unknown field");
                    }
                }
            }
            path.pop();
        }

        if let Some(slot) = schema.additional().filter(|_| !additional.is_empty()) {
            fields[slot.index] = Some(Value::Map(additional));
        }
        Ok(Value::Record(fields))
    }
}

fn text<'t>(token: &'t str, encoded: bool) -> Cow<'t, str> {
    if encoded {
        Cow::Borrowed(token)
    } else {
        codec::decode_token(token)
    }
}

/// Untyped reconstruction: one token is text, repeated tokens are a list.
fn loose(node: &ValueNode<'_>, encoded: bool) -> Loose {
    match node {
        ValueNode::Leaf(tokens) => match tokens.as_slice() {
            [token] => Loose::Text(text(token, encoded).into_owned()),
            tokens => Loose::List(
                tokens
                    .iter()
                    .map(|token| Loose::Text(text(token, encoded).into_owned()))
                    .collect(),
            ),
        },
        ValueNode::Indexed(children) => {
            Loose::List(children.values().map(|child| loose(child, encoded)).collect())
        }
        ValueNode::Keyed(children) => Loose::Map(
            children
                .iter()
                .map(|(key, child)| (key.clone(), loose(child, encoded)))
                .collect::<IndexMap<_, _>>(),
        ),
    }
}
