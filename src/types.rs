//! Core types for rangedb.

use std::fmt;
use std::ops;

use bytes::Bytes;

/// A stored (key, value) pair, as yielded by owned iteration.
pub type Entry = (String, Bytes);

/// One side of a scan interval.
///
/// The same type is used for both ends; which test applies depends on
/// whether it is passed as `start` or `end`:
///
/// | variant      | as `start`   | as `end`     |
/// |--------------|--------------|--------------|
/// | `NoBound`    | admits all   | admits all   |
/// | `Include(b)` | `k >= b`     | `k <= b`     |
/// | `Exclude(b)` | `k > b`      | `k < b`      |
///
/// The boundary key need not exist in the store; it is only a threshold.
/// Keys compare by their raw bytes, so `"A" < "B" < "a"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Bound {
    /// Unbounded on this side.
    #[default]
    NoBound,
    /// The boundary key itself is part of the interval.
    Include(String),
    /// The boundary key is not part of the interval.
    Exclude(String),
}

impl Bound {
    /// Create an inclusive bound.
    pub fn include(key: impl Into<String>) -> Self {
        Bound::Include(key.into())
    }

    /// Create an exclusive bound.
    pub fn exclude(key: impl Into<String>) -> Self {
        Bound::Exclude(key.into())
    }

    /// The boundary key, or `None` for `NoBound`.
    pub fn key(&self) -> Option<&str> {
        match self {
            Bound::NoBound => None,
            Bound::Include(k) | Bound::Exclude(k) => Some(k),
        }
    }

    /// Check if this side is unbounded.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::NoBound)
    }

    /// Lower admission test: does `key` pass this bound used as `start`?
    pub fn admits_from_start(&self, key: &str) -> bool {
        match self {
            Bound::NoBound => true,
            Bound::Include(s) => key >= s.as_str(),
            Bound::Exclude(s) => key > s.as_str(),
        }
    }

    /// Upper admission test: does `key` pass this bound used as `end`?
    pub fn admits_from_end(&self, key: &str) -> bool {
        match self {
            Bound::NoBound => true,
            Bound::Include(e) => key <= e.as_str(),
            Bound::Exclude(e) => key < e.as_str(),
        }
    }

    /// Check whether `key` falls inside the interval `(start, end)`.
    pub fn contains(start: &Bound, end: &Bound, key: &str) -> bool {
        start.admits_from_start(key) && end.admits_from_end(key)
    }

    /// Check whether no key at all can fall inside `(start, end)`.
    ///
    /// Catches inverted intervals and the degenerate `[k, k)`, `(k, k]`,
    /// `(k, k)` forms. `BTreeMap::range` panics on some of these, so
    /// backends call this before handing an interval to a collection.
    pub fn interval_is_empty(start: &Bound, end: &Bound) -> bool {
        if start.is_unbounded() || end.is_unbounded() {
            return false;
        }
        match (start, end) {
            (Bound::Include(s), Bound::Include(e)) => s > e,
            (Bound::Include(s), Bound::Exclude(e))
            | (Bound::Exclude(s), Bound::Include(e))
            | (Bound::Exclude(s), Bound::Exclude(e)) => s >= e,
            _ => false,
        }
    }

    /// Borrow this bound as a `std::ops::Bound` over `str`.
    pub fn as_std(&self) -> ops::Bound<&str> {
        match self {
            Bound::NoBound => ops::Bound::Unbounded,
            Bound::Include(k) => ops::Bound::Included(k.as_str()),
            Bound::Exclude(k) => ops::Bound::Excluded(k.as_str()),
        }
    }

    /// Convert into an owned `std::ops::Bound`.
    pub fn to_std_owned(&self) -> ops::Bound<String> {
        match self {
            Bound::NoBound => ops::Bound::Unbounded,
            Bound::Include(k) => ops::Bound::Included(k.clone()),
            Bound::Exclude(k) => ops::Bound::Excluded(k.clone()),
        }
    }
}

impl From<ops::Bound<String>> for Bound {
    fn from(bound: ops::Bound<String>) -> Self {
        match bound {
            ops::Bound::Unbounded => Bound::NoBound,
            ops::Bound::Included(k) => Bound::Include(k),
            ops::Bound::Excluded(k) => Bound::Exclude(k),
        }
    }
}

impl From<ops::Bound<&str>> for Bound {
    fn from(bound: ops::Bound<&str>) -> Self {
        match bound {
            ops::Bound::Unbounded => Bound::NoBound,
            ops::Bound::Included(k) => Bound::Include(k.to_owned()),
            ops::Bound::Excluded(k) => Bound::Exclude(k.to_owned()),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(key) = self.key() else {
            return f.write_str("*");
        };
        let marker = if matches!(self, Bound::Include(_)) { '=' } else { '!' };
        write!(f, "{marker}{key:?}")
    }
}
