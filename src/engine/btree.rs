//! Ordered-map backend.

use std::collections::BTreeMap;

use bytes::Bytes;
use tracing::trace;

use super::Engine;
use crate::iterator::{Empty, EngineIterator, IteratorDirection, RangeCursor};
use crate::types::Bound;

/// Engine backed by a `BTreeMap`.
///
/// Range iterators wrap `btree_map::Range` directly, so they are lazy and
/// borrow the map for their lifetime.
#[derive(Debug, Clone, Default)]
pub struct BTreeEngine {
    map: BTreeMap<String, Bytes>,
}

impl BTreeEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    fn range_cursor<'a>(
        &'a self,
        start: &Bound,
        end: &Bound,
        direction: IteratorDirection,
    ) -> Box<dyn EngineIterator + 'a> {
        trace!(engine = self.name(), %start, %end, ?direction, "range iterator");

        // BTreeMap::range panics on inverted intervals
        if Bound::interval_is_empty(start, end) {
            return Box::new(Empty::new(direction));
        }

        let range = self.map.range::<str, _>((start.as_std(), end.as_std()));
        match direction {
            IteratorDirection::Forward => Box::new(RangeCursor::new(range, direction)),
            IteratorDirection::Reverse => Box::new(RangeCursor::new(range.rev(), direction)),
        }
    }
}

impl Engine for BTreeEngine {
    fn name(&self) -> &'static str {
        "btree"
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        trace!(engine = self.name(), key, len = value.len(), "set");
        self.map
            .insert(key.to_owned(), Bytes::copy_from_slice(value));
    }

    fn delete(&mut self, key: &str) {
        let existed = self.map.remove(key).is_some();
        trace!(engine = self.name(), key, existed, "delete");
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        self.range_cursor(start, end, IteratorDirection::Forward)
    }

    fn reverse_iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        self.range_cursor(start, end, IteratorDirection::Reverse)
    }
}
