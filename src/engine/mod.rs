//! The storage engine contract and its in-memory backends.
//!
//! # Contract
//!
//! - `get` reports absence as `None`; an empty stored value is
//!   `Some(Bytes::new())`, never confused with absence.
//! - `set` inserts or overwrites and always succeeds.
//! - `delete` removes the key if present and is a no-op otherwise.
//! - `iter` / `reverse_iter` select exactly the keys admitted by both
//!   bounds (see [`Bound`]) and walk them ascending / descending. The
//!   selection never depends on the direction.
//! - `scan` / `reverse` are provided on top of the iterators, so the
//!   callback and cursor forms cannot disagree.
//!
//! # Isolation
//!
//! Iterators borrow the engine immutably and mutations take `&mut self`,
//! so the borrow checker rules out writes during an iteration pass.
//! [`SharedEngine`] extends this across threads with a read-write lock.

mod btree;
mod shared;
mod skiplist;
mod sorted;

pub use btree::BTreeEngine;
pub use shared::SharedEngine;
pub use skiplist::SkipListEngine;
pub use sorted::{SliceCursor, SortedVecEngine};

use bytes::Bytes;
use tracing::debug;

use crate::iterator::{drive, EngineIterator};
use crate::options::{EngineKind, Options};
use crate::types::Bound;
use crate::Result;

/// Abstract key-value storage engine.
///
/// Keys are strings ordered by their raw bytes. Values are arbitrary
/// bytes, including the empty sequence.
pub trait Engine {
    /// Short backend identifier, used in logs and conformance reports.
    fn name(&self) -> &'static str;

    /// Look up a key.
    ///
    /// Returns `None` if the key is absent. The returned handle is
    /// independent of the store: later writes do not change it.
    fn get(&self, key: &str) -> Option<Bytes>;

    /// Insert or overwrite a key.
    fn set(&mut self, key: &str, value: &[u8]);

    /// Remove a key. No-op if the key does not exist.
    fn delete(&mut self, key: &str);

    /// Number of live keys.
    ///
    /// Counts through a full scan by default; backends that track their
    /// size override it.
    fn len(&self) -> usize {
        let mut count = 0;
        self.scan(&Bound::NoBound, &Bound::NoBound, &mut |_, _| {
            count += 1;
            true
        });
        count
    }

    /// Check if the engine holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ascending cursor over the keys in `(start, end)`.
    fn iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a>;

    /// Descending cursor over the same interval as [`Engine::iter`].
    fn reverse_iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a>;

    /// Visit the keys in `(start, end)` in ascending order.
    ///
    /// `visit` returns `true` to continue and `false` to stop.
    fn scan(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        drive(self.iter(start, end), visit);
    }

    /// Visit the keys in `(start, end)` in descending order.
    ///
    /// `visit` returns `true` to continue and `false` to stop.
    fn reverse(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        drive(self.reverse_iter(start, end), visit);
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) {
        (**self).delete(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        (**self).iter(start, end)
    }

    fn reverse_iter<'a>(&'a self, start: &Bound, end: &Bound) -> Box<dyn EngineIterator + 'a> {
        (**self).reverse_iter(start, end)
    }

    fn scan(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        (**self).scan(start, end, visit)
    }

    fn reverse(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        (**self).reverse(start, end, visit)
    }
}

/// Open an empty engine of the kind selected by `options`.
pub fn open(options: &Options) -> Result<Box<dyn Engine + Send + Sync>> {
    options.validate()?;

    let engine: Box<dyn Engine + Send + Sync> = match options.engine {
        EngineKind::BTree => Box::new(BTreeEngine::new()),
        EngineKind::SkipList => Box::new(SkipListEngine::new()),
        EngineKind::SortedVec => Box::new(SortedVecEngine::with_capacity(options.capacity_hint)),
    };

    debug!(
        engine = engine.name(),
        capacity_hint = options.capacity_hint,
        "opened engine"
    );
    Ok(engine)
}
