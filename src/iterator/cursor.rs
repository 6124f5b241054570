//! Generic cursor implementations shared by the backends.

use bytes::Bytes;
use crossbeam_skiplist::map;

use super::{EngineIterator, IteratorDirection};
use crate::types::Entry;

/// Abort on a precondition violation: reading an exhausted cursor.
#[cold]
#[track_caller]
pub fn exhausted(op: &str) -> ! {
    panic!("{op}() called on an exhausted iterator")
}

/// Borrowed view of one stored entry, as produced by a backend's
/// ordered collection.
pub trait EntryView {
    /// The entry's key.
    fn key(&self) -> &str;

    /// The entry's value.
    fn value(&self) -> &[u8];
}

impl EntryView for (&String, &Bytes) {
    fn key(&self) -> &str {
        self.0.as_str()
    }

    fn value(&self) -> &[u8] {
        self.1.as_ref()
    }
}

impl EntryView for &(String, Bytes) {
    fn key(&self) -> &str {
        self.0.as_str()
    }

    fn value(&self) -> &[u8] {
        self.1.as_ref()
    }
}

impl EntryView for map::Entry<'_, String, Bytes> {
    fn key(&self) -> &str {
        map::Entry::key(self).as_str()
    }

    fn value(&self) -> &[u8] {
        map::Entry::value(self).as_ref()
    }
}

/// Cursor over any ordered iterator of entries.
///
/// The inner iterator must already be restricted to the interval and
/// already run in the wanted direction (call `.rev()` before wrapping for
/// reverse scans). The cursor pulls one entry ahead so that `key()` and
/// `value()` can borrow it, and never polls the inner iterator again once
/// it has returned `None`.
pub struct RangeCursor<I: Iterator> {
    /// Remaining entries.
    inner: I,
    /// Entry the cursor is positioned on.
    current: Option<I::Item>,
    /// Direction of the inner iterator.
    direction: IteratorDirection,
}

impl<I> RangeCursor<I>
where
    I: Iterator,
    I::Item: EntryView,
{
    /// Create a cursor positioned on the first entry of `inner`.
    pub fn new(mut inner: I, direction: IteratorDirection) -> Self {
        let current = inner.next();
        Self {
            inner,
            current,
            direction,
        }
    }
}

impl<I> EngineIterator for RangeCursor<I>
where
    I: Iterator,
    I::Item: EntryView,
{
    fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    fn key(&self) -> &str {
        match &self.current {
            Some(entry) => entry.key(),
            None => exhausted("key"),
        }
    }

    fn value(&self) -> &[u8] {
        match &self.current {
            Some(entry) => entry.value(),
            None => exhausted("value"),
        }
    }

    fn next(&mut self) {
        if self.current.is_some() {
            self.current = self.inner.next();
        }
    }

    fn direction(&self) -> IteratorDirection {
        self.direction
    }
}

/// A cursor that is exhausted from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty {
    direction: IteratorDirection,
}

impl Empty {
    /// Create an exhausted cursor.
    pub fn new(direction: IteratorDirection) -> Self {
        Self { direction }
    }
}

impl EngineIterator for Empty {
    fn is_valid(&self) -> bool {
        false
    }

    fn key(&self) -> &str {
        exhausted("key")
    }

    fn value(&self) -> &[u8] {
        exhausted("value")
    }

    fn next(&mut self) {}

    fn direction(&self) -> IteratorDirection {
        self.direction
    }
}

/// Standard iterator adapter over a cursor, yielding owned entries.
pub struct Entries<I> {
    cursor: I,
}

impl<I: EngineIterator> Entries<I> {
    /// Wrap `cursor`.
    pub fn new(cursor: I) -> Self {
        Self { cursor }
    }
}

impl<I: EngineIterator> Iterator for Entries<I> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.is_valid() {
            return None;
        }
        let entry = (
            self.cursor.key().to_owned(),
            Bytes::copy_from_slice(self.cursor.value()),
        );
        self.cursor.next();
        Some(entry)
    }
}

impl<I: EngineIterator> std::iter::FusedIterator for Entries<I> {}
