//! Bracketed key paths: `name[segment][segment]...`.

use core::fmt;

use crate::codec;

/// One step of a [`KeyPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A record field, map key or top-level name.
    Name(String),
    /// A list position.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The location of a value inside the nested structure, such as `a[b][0]`.
///
/// `Display` shows the path unencoded; [`KeyPath::render`] produces the wire
/// form with every segment percent-encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// An empty path, pointing at the top level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Removes the last segment.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true for the top-level path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Renders the path as a wire key.
    pub fn render(&self) -> String {
        let mut key = String::new();
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                key.push('[');
            }
            match segment {
                Segment::Name(name) => key.push_str(&codec::encode_token(name)),
                Segment::Index(index) => key.push_str(&index.to_string()),
            }
            if position > 0 {
                key.push(']');
            }
        }
        key
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position == 0 {
                write!(f, "{segment}")?;
            } else {
                write!(f, "[{segment}]")?;
            }
        }
        Ok(())
    }
}

impl FromIterator<Segment> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// A segment of an incoming key, borrowed from the decoded key text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeySegment<'k> {
    Name(&'k str),
    Index(usize),
    /// `[]`: the position after the last one seen so far.
    Append,
}

impl KeySegment<'_> {
    pub(crate) fn to_segment(self, append_at: usize) -> Segment {
        match self {
            KeySegment::Name(name) => Segment::Name(name.to_owned()),
            KeySegment::Index(index) => Segment::Index(index),
            KeySegment::Append => Segment::Index(append_at),
        }
    }
}

/// Splits a decoded key into its segments.
///
/// The leading name is always a [`KeySegment::Name`]. A bracketed segment is
/// an index only when written canonically (`0`, or digits without a leading
/// zero); anything else is a name.
pub(crate) fn parse_key(key: &str) -> Result<Vec<KeySegment<'_>>, &'static str> {
    if key.is_empty() {
        return Err("empty key");
    }

    let (head, mut rest) = match key.find(['[', ']']) {
        Some(at) => key.split_at(at),
        None => (key, ""),
    };
    if head.is_empty() {
        return Err("key starts with a bracket");
    }

    let mut segments = vec![KeySegment::Name(head)];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return Err(if rest.starts_with(']') {
                "unmatched `]`"
            } else {
                "text after a closing bracket"
            });
        };
        let Some(close) = inner.find(['[', ']']) else {
            return Err("unclosed `[`");
        };
        if inner.as_bytes()[close] == b'[' {
            return Err("`[` inside a bracketed segment");
        }
        segments.push(classify(&inner[..close]));
        rest = &inner[close + 1..];
    }
    Ok(segments)
}

fn classify(segment: &str) -> KeySegment<'_> {
    if segment.is_empty() {
        return KeySegment::Append;
    }
    let canonical = segment.bytes().all(|b| b.is_ascii_digit())
        && (segment.len() == 1 || !segment.starts_with('0'));
    match segment.parse::<usize>() {
        Ok(index) if canonical => KeySegment::Index(index),
        _ => KeySegment::Name(segment),
    }
}
