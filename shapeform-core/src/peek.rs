use core::fmt;

use crate::{Loose, ReflectError, Scalar};

/// A read-only view of a value, as seen by an encoder.
///
/// Containers are exposed through small object-safe traits so an encoder can
/// walk any implementation without knowing the concrete type.
#[derive(Clone)]
pub enum Peek<'mem> {
    /// An absent value (`None`); nothing is written for it.
    Null,
    /// A scalar.
    Scalar(Scalar<'mem>),
    /// A list or array.
    List(&'mem dyn PeekList),
    /// A map.
    Map(&'mem dyn PeekMap),
    /// A record.
    Record(&'mem dyn PeekRecord),
    /// An untyped container.
    Raw(&'mem Loose),
}

impl Peek<'_> {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Peek::Null => "null",
            Peek::Scalar(_) => "scalar",
            Peek::List(_) => "list",
            Peek::Map(_) => "map",
            Peek::Record(_) => "record",
            Peek::Raw(_) => "raw",
        }
    }
}

impl fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peek::Scalar(scalar) => write!(f, "Peek::Scalar({scalar:?})"),
            Peek::Raw(loose) => write!(f, "Peek::Raw({loose:?})"),
            other => write!(f, "Peek::{}", other.kind()),
        }
    }
}

/// Positional access to the items of a list or array.
pub trait PeekList {
    /// Number of items.
    fn len(&self) -> usize;

    /// Returns true if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The item at `index`, or `None` when out of bounds.
    fn item(&self, index: usize) -> Option<Peek<'_>>;
}

/// Iterator over `(key, value)` views of a map.
pub type PeekMapIter<'mem> = Box<dyn Iterator<Item = (Peek<'mem>, Peek<'mem>)> + 'mem>;

/// Entry access to a map.
///
/// Fallible, so implementations backed by something other than memory can
/// report failures instead of panicking.
pub trait PeekMap {
    /// Iterates over the entries in the map's own order.
    fn entries(&self) -> Result<PeekMapIter<'_>, ReflectError>;
}

/// Field access to a record.
pub trait PeekRecord {
    /// Views of every declared field, in declaration order.
    fn fields(&self) -> Vec<Peek<'_>>;
}
