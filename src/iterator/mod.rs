//! Cursor-style iterators for range scans.
//!
//! Every backend hands out its range iterators as `EngineIterator`
//! trait objects:
//! - `RangeCursor`: wraps any ordered Rust iterator over borrowed entries
//! - `Empty`: an already exhausted cursor, for empty intervals
//! - `Entries`: adapts a cursor into a `std::iter::Iterator` of owned pairs
//!
//! # Precondition policy
//!
//! `key()` and `value()` may only be called while `is_valid()` is true.
//! Every iterator in this crate panics when they are called on an
//! exhausted cursor. `next()` on an exhausted cursor is a no-op.

mod cursor;

pub use cursor::{exhausted, Empty, Entries, EntryView, RangeCursor};

/// Direction for iterator traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IteratorDirection {
    /// Forward iteration (ascending key order).
    #[default]
    Forward,
    /// Reverse iteration (descending key order).
    Reverse,
}

impl IteratorDirection {
    /// Check if this is reverse traversal.
    pub fn is_reverse(&self) -> bool {
        matches!(self, IteratorDirection::Reverse)
    }
}

/// A stateful cursor over the entries of one interval.
///
/// A cursor starts positioned on the first qualifying entry in its
/// direction (or exhausted, if there is none). Once exhausted it stays
/// exhausted.
pub trait EngineIterator {
    /// Check if the cursor is positioned at an entry.
    fn is_valid(&self) -> bool;

    /// The current key. Panics if `!is_valid()`.
    fn key(&self) -> &str;

    /// The current value. Panics if `!is_valid()`.
    fn value(&self) -> &[u8];

    /// Move to the next entry in the traversal direction.
    fn next(&mut self);

    /// Traversal direction of this cursor.
    fn direction(&self) -> IteratorDirection;

    /// Turn this cursor into a standard iterator of owned entries.
    fn entries(self) -> Entries<Self>
    where
        Self: Sized,
    {
        Entries::new(self)
    }
}

impl<I: EngineIterator + ?Sized> EngineIterator for Box<I> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn key(&self) -> &str {
        (**self).key()
    }

    fn value(&self) -> &[u8] {
        (**self).value()
    }

    fn next(&mut self) {
        (**self).next()
    }

    fn direction(&self) -> IteratorDirection {
        (**self).direction()
    }
}

/// Drive `iter` to exhaustion, feeding each entry to `visit`.
///
/// Stops early the first time `visit` returns `false`. Returns the number
/// of entries handed to `visit`.
pub fn drive<I>(mut iter: I, visit: &mut dyn FnMut(&str, &[u8]) -> bool) -> usize
where
    I: EngineIterator,
{
    let mut visited = 0;
    while iter.is_valid() {
        visited += 1;
        if !visit(iter.key(), iter.value()) {
            break;
        }
        iter.next();
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::collections::BTreeMap;

    fn sample() -> BTreeMap<String, Bytes> {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Bytes::from("1"));
        map.insert("b".to_string(), Bytes::from("2"));
        map.insert("c".to_string(), Bytes::from("3"));
        map
    }

    #[test]
    fn test_direction_is_reverse() {
        assert!(!IteratorDirection::default().is_reverse());
        assert!(!IteratorDirection::Forward.is_reverse());
        assert!(IteratorDirection::Reverse.is_reverse());
    }

    #[test]
    fn test_drive_visits_in_order() {
        let map = sample();
        let cursor = RangeCursor::new(map.iter(), IteratorDirection::Forward);

        let mut seen = Vec::new();
        let visited = drive(cursor, &mut |k, v| {
            seen.push((k.to_string(), v.to_vec()));
            true
        });

        assert_eq!(visited, 3);
        assert_eq!(seen[0], ("a".to_string(), b"1".to_vec()));
        assert_eq!(seen[2], ("c".to_string(), b"3".to_vec()));
    }

    #[test]
    fn test_drive_stops_early() {
        let map = sample();
        let cursor = RangeCursor::new(map.iter().rev(), IteratorDirection::Reverse);

        let mut keys = Vec::new();
        let visited = drive(cursor, &mut |k, _| {
            keys.push(k.to_string());
            keys.len() < 2
        });

        assert_eq!(visited, 2);
        assert_eq!(keys, vec!["c", "b"]);
    }

    #[test]
    fn test_boxed_cursor_delegates() {
        let map = sample();
        let mut cursor: Box<dyn EngineIterator + '_> =
            Box::new(RangeCursor::new(map.iter(), IteratorDirection::Forward));

        assert!(cursor.is_valid());
        assert_eq!(cursor.key(), "a");
        assert_eq!(cursor.direction(), IteratorDirection::Forward);
        cursor.next();
        assert_eq!(cursor.value(), b"2");

        let rest: Vec<_> = cursor.entries().map(|(k, _)| k).collect();
        assert_eq!(rest, vec!["b", "c"]);
    }
}
