//! Skip list backend.
//!
//! Uses `crossbeam-skiplist` the same way a memtable would: a lock-free
//! sorted map whose range iterator walks level 0 in either direction.

use bytes::Bytes;
use crossbeam_skiplist::SkipMap;
use tracing::trace;

use super::Engine;
use crate::iterator::{Empty, EngineIterator, IteratorDirection, RangeCursor};
use crate::types::Bound;

/// Engine backed by a concurrent skip list.
#[derive(Debug)]
pub struct SkipListEngine {
    /// Key: user key, Value: raw bytes.
    table: SkipMap<String, Bytes>,
}

impl SkipListEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            table: SkipMap::new(),
        }
    }

    fn range_cursor<'a>(
        &'a self,
        start: &Bound,
        end: &Bound,
        direction: IteratorDirection,
    ) -> Box<dyn EngineIterator + 'a> {
        trace!(engine = self.name(), %start, %end, ?direction, "range iterator");

        if Bound::interval_is_empty(start, end) {
            return Box::new(Empty::new(direction));
        }

        let range = self
            .table
            .range::<String, _>((start.to_std_owned(), end.to_std_owned()));
        match direction {
            IteratorDirection::Forward => Box::new(RangeCursor::new(range, direction)),
            IteratorDirection::Reverse => Box::new(RangeCursor::new(range.rev(), direction)),
        }
    }
}

impl Default for SkipListEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SkipListEngine {
    fn name(&self) -> &'static str {
        "skiplist"
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        self.table.get(key).map(|entry| entry.value().clone())
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        trace!(engine = self.name(), key, len = value.len(), "set");
        self.table
            .insert(key.to_owned(), Bytes::copy_from_slice(value));
    }

    fn delete(&mut self, key: &str) {
        let existed = self.table.remove(key).is_some();
        trace!(engine = self.name(), key, existed, "delete");
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        self.range_cursor(start, end, IteratorDirection::Forward)
    }

    fn reverse_iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        self.range_cursor(start, end, IteratorDirection::Reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skiplist_put_get_delete() {
        let mut engine = SkipListEngine::new();

        engine.set("user:1", b"alice");
        engine.set("user:2", b"bob");
        engine.set("user:1", b"alice2");

        assert_eq!(engine.get("user:1"), Some(Bytes::from("alice2")));
        assert_eq!(engine.len(), 2);

        engine.delete("user:1");
        assert_eq!(engine.get("user:1"), None);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_skiplist_sorted_iteration() {
        let mut engine = SkipListEngine::new();
        for i in (0..50u32).rev() {
            let key = format!("key_{:03}", i);
            engine.set(&key, format!("val_{}", i).as_bytes());
        }

        let collected: Vec<_> = engine
            .iter(&Bound::NoBound, &Bound::NoBound)
            .entries()
            .collect();
        assert_eq!(collected.len(), 50);
        for (i, (key, value)) in collected.iter().enumerate() {
            assert_eq!(key, &format!("key_{:03}", i));
            assert_eq!(value, &Bytes::from(format!("val_{}", i)));
        }
    }

    #[test]
    fn test_skiplist_reverse_with_absent_bounds() {
        let mut engine = SkipListEngine::new();
        for key in ["a", "c", "e", "g"] {
            engine.set(key, b"x");
        }

        let keys: Vec<_> = engine
            .reverse_iter(&Bound::include("b"), &Bound::include("f"))
            .entries()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["e", "c"]);
    }

    #[test]
    fn test_skiplist_empty_interval() {
        let mut engine = SkipListEngine::new();
        engine.set("k", b"v");
        assert!(!engine
            .iter(&Bound::include("k"), &Bound::exclude("k"))
            .is_valid());
    }
}
