//! Thread-safe handle around any engine.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::{RwLock, RwLockReadGuard};

use super::{open, Engine};
use crate::iterator::{EngineIterator, IteratorDirection};
use crate::options::Options;
use crate::types::{Bound, Entry};
use crate::Result;

/// The boxed engine type a [`SharedEngine`] guards.
pub type BoxedEngine = Box<dyn Engine + Send + Sync>;

/// Cloneable, thread-safe handle to one engine.
///
/// Many readers or one writer at a time. Every scan holds the read lock
/// for the whole pass, so a traversal never overlaps a `set` or `delete`.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<BoxedEngine>>,
}

impl SharedEngine {
    /// Wrap an existing engine.
    pub fn new(engine: BoxedEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Open a fresh engine from `options` and wrap it.
    pub fn open(options: &Options) -> Result<Self> {
        Ok(Self::new(open(options)?))
    }

    /// Backend identifier of the wrapped engine.
    pub fn name(&self) -> &'static str {
        self.inner.read().name()
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.read().get(key)
    }

    /// Insert or overwrite a key.
    pub fn set(&self, key: &str, value: &[u8]) {
        self.inner.write().set(key, value);
    }

    /// Remove a key.
    pub fn delete(&self, key: &str) {
        self.inner.write().delete(key);
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the engine holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Ascending scan under the read lock. See [`Engine::scan`].
    pub fn scan(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        self.inner.read().scan(start, end, visit);
    }

    /// Descending scan under the read lock. See [`Engine::reverse`].
    pub fn reverse(&self, start: &Bound, end: &Bound, visit: &mut dyn FnMut(&str, &[u8]) -> bool) {
        self.inner.read().reverse(start, end, visit);
    }

    /// Copy out every entry of `(start, end)` in `direction`.
    pub fn collect_range(
        &self,
        start: &Bound,
        end: &Bound,
        direction: IteratorDirection,
    ) -> Vec<Entry> {
        let guard = self.inner.read();
        let iter = if direction.is_reverse() {
            guard.reverse_iter(start, end)
        } else {
            guard.iter(start, end)
        };
        iter.entries().collect()
    }

    /// Hold the read lock, for driving cursors by hand.
    ///
    /// Writers block until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, BoxedEngine> {
        self.inner.read()
    }
}

impl std::fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine")
            .field("engine", &self.name())
            .field("len", &self.len())
            .finish()
    }
}
