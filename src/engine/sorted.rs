//! Sorted array backend.
//!
//! Entries live in one `Vec` kept in key order. Point operations binary
//! search it; a range scan resolves both bounds to an index window with
//! `partition_point` and walks the window with a positional cursor.

use bytes::Bytes;
use tracing::trace;

use super::Engine;
use crate::iterator::{exhausted, EngineIterator, IteratorDirection};
use crate::types::{Bound, Entry};

/// Engine backed by a sorted vector.
///
/// Cheap scans and lookups, `O(n)` inserts and deletes.
#[derive(Debug, Clone, Default)]
pub struct SortedVecEngine {
    entries: Vec<Entry>,
}

impl SortedVecEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Index of `key`, or the index where it would be inserted.
    fn search(&self, key: &str) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
    }

    /// Resolve `(start, end)` to the index window `[lo, hi)`.
    ///
    /// An inverted interval resolves to an empty window at `lo`.
    pub fn window(&self, start: &Bound, end: &Bound) -> (usize, usize) {
        let lo = match start {
            Bound::NoBound => 0,
            Bound::Include(s) => self.entries.partition_point(|(k, _)| k < s),
            Bound::Exclude(s) => self.entries.partition_point(|(k, _)| k <= s),
        };
        let hi = match end {
            Bound::NoBound => self.entries.len(),
            Bound::Include(e) => self.entries.partition_point(|(k, _)| k <= e),
            Bound::Exclude(e) => self.entries.partition_point(|(k, _)| k < e),
        };
        (lo, hi.max(lo))
    }

    fn cursor(&self, start: &Bound, end: &Bound, direction: IteratorDirection) -> SliceCursor<'_> {
        let (lo, hi) = self.window(start, end);
        trace!(engine = self.name(), %start, %end, lo, hi, ?direction, "range iterator");
        SliceCursor::new(&self.entries[lo..hi], direction)
    }
}

impl Engine for SortedVecEngine {
    fn name(&self) -> &'static str {
        "sorted"
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        self.search(key).ok().map(|idx| self.entries[idx].1.clone())
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        trace!(engine = self.name(), key, len = value.len(), "set");
        let value = Bytes::copy_from_slice(value);
        match self.search(key) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (key.to_owned(), value)),
        }
    }

    fn delete(&mut self, key: &str) {
        let found = self.search(key);
        if let Ok(idx) = found {
            self.entries.remove(idx);
        }
        trace!(engine = self.name(), key, existed = found.is_ok(), "delete");
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        Box::new(self.cursor(start, end, IteratorDirection::Forward))
    }

    fn reverse_iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        Box::new(self.cursor(start, end, IteratorDirection::Reverse))
    }
}

/// Positional cursor over a sorted window of entries.
///
/// Forward cursors point at the current entry. Reverse cursors point one
/// past it, so position `0` means exhausted in both directions' terms
/// without underflow.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    /// Entries in the interval, ascending.
    window: &'a [Entry],
    /// Current position.
    position: usize,
    /// Direction of iteration.
    direction: IteratorDirection,
}

impl<'a> SliceCursor<'a> {
    /// Create a cursor on the first entry of `window` in `direction`.
    pub fn new(window: &'a [Entry], direction: IteratorDirection) -> Self {
        let position = match direction {
            IteratorDirection::Forward => 0,
            IteratorDirection::Reverse => window.len(),
        };
        Self {
            window,
            position,
            direction,
        }
    }

    /// Number of entries in the window, consumed or not.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    fn current(&self) -> Option<&'a Entry> {
        let idx = match self.direction {
            IteratorDirection::Forward => self.position,
            IteratorDirection::Reverse => self.position.checked_sub(1)?,
        };
        self.window.get(idx)
    }
}

impl EngineIterator for SliceCursor<'_> {
    fn is_valid(&self) -> bool {
        match self.direction {
            IteratorDirection::Forward => self.position < self.window.len(),
            IteratorDirection::Reverse => self.position > 0,
        }
    }

    fn key(&self) -> &str {
        match self.current() {
            Some((k, _)) => k.as_str(),
            None => exhausted("key"),
        }
    }

    fn value(&self) -> &[u8] {
        match self.current() {
            Some((_, v)) => v.as_ref(),
            None => exhausted("value"),
        }
    }

    fn next(&mut self) {
        match self.direction {
            IteratorDirection::Forward => {
                if self.position < self.window.len() {
                    self.position += 1;
                }
            }
            IteratorDirection::Reverse => {
                if self.position > 0 {
                    self.position -= 1;
                }
            }
        }
    }

    fn direction(&self) -> IteratorDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SortedVecEngine {
        let mut engine = SortedVecEngine::new();
        // insert out of order
        for key in ["c", "a", "bb", "b", "aa"] {
            engine.set(key, key.as_bytes());
        }
        engine
    }

    #[test]
    fn test_sorted_keeps_order() {
        let engine = fixture();
        let keys: Vec<_> = engine.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "aa", "b", "bb", "c"]);
    }

    #[test]
    fn test_sorted_window() {
        let engine = fixture();
        assert_eq!(engine.window(&Bound::NoBound, &Bound::NoBound), (0, 5));
        assert_eq!(engine.window(&Bound::include("aa"), &Bound::exclude("bb")), (1, 3));
        assert_eq!(engine.window(&Bound::exclude("aa"), &Bound::include("bb")), (2, 4));
        // absent bounds
        assert_eq!(engine.window(&Bound::include("ab"), &Bound::include("ba")), (2, 3));
        // inverted
        assert_eq!(engine.window(&Bound::include("c"), &Bound::include("a")), (4, 4));
    }

    #[test]
    fn test_sorted_overwrite_and_delete() {
        let mut engine = fixture();
        engine.set("b", b"");
        assert_eq!(engine.get("b"), Some(Bytes::new()));
        assert_eq!(engine.len(), 5);

        engine.delete("b");
        engine.delete("zz");
        assert_eq!(engine.get("b"), None);
        assert_eq!(engine.len(), 4);
    }

    #[test]
    fn test_slice_cursor_reverse() {
        let engine = fixture();
        let mut cursor = engine.cursor(
            &Bound::include("aa"),
            &Bound::NoBound,
            IteratorDirection::Reverse,
        );
        assert_eq!(cursor.window_len(), 4);

        let mut keys = Vec::new();
        while cursor.is_valid() {
            keys.push(cursor.key().to_string());
            cursor.next();
        }
        assert_eq!(keys, vec!["c", "bb", "b", "aa"]);

        cursor.next();
        assert!(!cursor.is_valid());
    }

    #[test]
    fn test_slice_cursor_empty_window() {
        let engine = fixture();
        let mut cursor = engine.cursor(
            &Bound::exclude("c"),
            &Bound::NoBound,
            IteratorDirection::Forward,
        );
        assert!(!cursor.is_valid());
        cursor.next();
        assert!(!cursor.is_valid());
    }
}
