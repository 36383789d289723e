//! Groups wire pairs into a tree by key path, before any type is consulted.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::trace;

use crate::key_path::{KeySegment, parse_key};
use crate::{DecodeError, KeyPath, Segment, codec};

/// Pairs grouped by key path. Value tokens are kept as they appeared on the
/// wire; decoding them is left to whoever knows the target type.
#[derive(Debug, PartialEq)]
pub(crate) enum ValueNode<'w> {
    /// Every token given for this exact key, in order.
    Leaf(Vec<&'w str>),
    /// Children under numeric segments.
    Indexed(BTreeMap<usize, ValueNode<'w>>),
    /// Children under named segments, in first-seen order.
    Keyed(IndexMap<String, ValueNode<'w>>),
}

impl<'w> ValueNode<'w> {
    /// An empty node shaped for what the remaining segments address.
    fn for_segments(segments: &[KeySegment<'_>]) -> Self {
        match segments.first() {
            None => ValueNode::Leaf(Vec::new()),
            Some(KeySegment::Name(_)) => ValueNode::Keyed(IndexMap::new()),
            Some(KeySegment::Index(_) | KeySegment::Append) => ValueNode::Indexed(BTreeMap::new()),
        }
    }

    fn insert(
        &mut self,
        segments: &[KeySegment<'_>],
        token: &'w str,
        path: &mut KeyPath,
    ) -> Result<(), DecodeError> {
        let conflict = |path: &KeyPath, reason| DecodeError::TypeConflict {
            path: path.clone(),
            reason,
        };

        let Some((segment, rest)) = segments.split_first() else {
            return match self {
                ValueNode::Leaf(tokens) => {
                    tokens.push(token);
                    Ok(())
                }
                _ => Err(conflict(path, "used both as a value and as a container")),
            };
        };

        let child = match (self, *segment) {
            (ValueNode::Leaf(_), _) => {
                return Err(conflict(path, "used both as a value and as a container"));
            }
            (ValueNode::Keyed(children), KeySegment::Name(name)) => {
                path.push(Segment::Name(name.to_owned()));
                children
                    .entry(name.to_owned())
                    .or_insert_with(|| ValueNode::for_segments(rest))
            }
            (ValueNode::Indexed(children), KeySegment::Index(_) | KeySegment::Append) => {
                let next = children.last_key_value().map_or(0, |(last, _)| last + 1);
                let at = match *segment {
                    KeySegment::Index(index) => index,
                    _ => next,
                };
                path.push(segment.to_segment(at));
                children
                    .entry(at)
                    .or_insert_with(|| ValueNode::for_segments(rest))
            }
            (ValueNode::Keyed(_), _) | (ValueNode::Indexed(_), _) => {
                return Err(conflict(path, "used with both indices and names"));
            }
        };
        child.insert(rest, token, path)
    }
}

/// Splits `input` into pairs and groups them by key.
///
/// Empty pieces between `&` are skipped and a pair without `=` has an empty
/// value. Keys are percent-decoded before their brackets are parsed.
pub(crate) fn build(input: &str) -> Result<ValueNode<'_>, DecodeError> {
    let mut root = ValueNode::Keyed(IndexMap::new());
    for pair in input.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_key, token) = pair.split_once('=').unwrap_or((pair, ""));
        let key = codec::decode_token(raw_key);
        let segments = parse_key(&key).map_err(|reason| DecodeError::MalformedKey {
            key: key.clone().into_owned(),
            reason,
        })?;
        trace!(key = %key, token, "pair");
        root.insert(&segments, token, &mut KeyPath::new())?;
    }
    Ok(root)
}
