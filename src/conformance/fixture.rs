//! Shared fixture data and helpers for the conformance checks.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use bytes::Bytes;

use crate::engine::Engine;
use crate::iterator::EngineIterator;
use crate::types::{Bound, Entry};
use crate::{Error, Result};

/// Keys sharing common prefixes, in ascending byte order, with their values.
///
/// `aaaa` deliberately maps to `aaaaa` so that a backend returning the key
/// instead of the value is caught.
pub const FIXTURE: [(&str, &str); 9] = [
    ("a", "a"),
    ("aa", "aa"),
    ("aaa", "aaa"),
    ("aaaa", "aaaaa"),
    ("b", "b"),
    ("ba", "ba"),
    ("bb", "bb"),
    ("bc", "bc"),
    ("c", "c"),
];

/// Order in which [`load_fixture`] inserts `FIXTURE`, so that backends
/// must sort rather than rely on insertion order.
const LOAD_ORDER: [usize; 9] = [4, 0, 8, 2, 6, 1, 7, 3, 5];

/// Boundary keys for the cross-product check: fixture keys, keys absent
/// from the store (prefix extensions, gaps, upper case), and keys sorting
/// before or after everything.
pub const PROBE_KEYS: [&str; 17] = [
    "", "0", "A", "a", "aa", "aab", "aaaa", "aaaaa", "ab", "b", "ba", "baa", "bc", "bd", "c",
    "cc", "~",
];

/// Insert every fixture entry into `engine`.
pub fn load_fixture(engine: &mut dyn Engine) {
    for idx in LOAD_ORDER {
        let (key, value) = FIXTURE[idx];
        engine.set(key, value.as_bytes());
    }
}

/// The fixture entries at `window`, as owned pairs.
pub fn fixture_window(window: Range<usize>) -> Vec<Entry> {
    FIXTURE[window]
        .iter()
        .map(|(k, v)| (k.to_string(), Bytes::from_static(v.as_bytes())))
        .collect()
}

/// Every bound built from [`PROBE_KEYS`], plus `NoBound`.
pub fn probe_bounds() -> Vec<Bound> {
    let mut bounds = vec![Bound::NoBound];
    for key in PROBE_KEYS {
        bounds.push(Bound::include(key));
        bounds.push(Bound::exclude(key));
    }
    bounds
}

/// Fixture entries inside `(start, end)`, ascending.
///
/// Written against `Ordering` directly rather than through `Bound`'s own
/// admission tests, so a bug there cannot hide in both sides of a
/// comparison.
pub fn reference_entries(start: &Bound, end: &Bound) -> Vec<Entry> {
    let lower = |key: &str| match start {
        Bound::NoBound => true,
        Bound::Include(s) => key.cmp(s.as_str()) != Ordering::Less,
        Bound::Exclude(s) => key.cmp(s.as_str()) == Ordering::Greater,
    };
    let upper = |key: &str| match end {
        Bound::NoBound => true,
        Bound::Include(e) => key.cmp(e.as_str()) != Ordering::Greater,
        Bound::Exclude(e) => key.cmp(e.as_str()) == Ordering::Less,
    };

    FIXTURE
        .iter()
        .filter(|(k, _)| lower(*k) && upper(*k))
        .map(|(k, v)| (k.to_string(), Bytes::from_static(v.as_bytes())))
        .collect()
}

/// Drain a cursor into owned entries.
///
/// Fails instead of looping forever if the cursor yields more than
/// `limit` entries (a wrapping or stuck cursor).
pub fn drain(
    check: &'static str,
    mut iter: Box<dyn EngineIterator + '_>,
    limit: usize,
) -> Result<Vec<Entry>> {
    let mut out = Vec::new();
    while iter.is_valid() {
        if out.len() == limit {
            return Err(Error::conformance(
                check,
                format!("cursor yielded more than {} entries", limit),
            ));
        }
        out.push((iter.key().to_owned(), Bytes::copy_from_slice(iter.value())));
        iter.next();
    }
    Ok(out)
}

/// Collect what a callback scan visits.
pub fn collect_visits(scan: impl FnOnce(&mut dyn FnMut(&str, &[u8]) -> bool)) -> Vec<Entry> {
    let mut out = Vec::new();
    scan(&mut |k, v| {
        out.push((k.to_owned(), Bytes::copy_from_slice(v)));
        true
    });
    out
}

/// Keys only, for readable failure messages.
pub fn keys(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|(k, _)| k.as_str()).collect()
}

/// Fail `check` unless `actual == expected`.
pub fn expect_eq<T>(
    check: &'static str,
    context: impl fmt::Display,
    actual: T,
    expected: T,
) -> Result<()>
where
    T: PartialEq + fmt::Debug,
{
    if actual == expected {
        Ok(())
    } else {
        Err(Error::conformance(
            check,
            format!("{}: expected {:?}, got {:?}", context, expected, actual),
        ))
    }
}

/// Fail `check` with `detail()` unless `cond` holds.
pub fn ensure(check: &'static str, cond: bool, detail: impl FnOnce() -> String) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::conformance(check, detail()))
    }
}

/// Describe an interval for failure messages.
pub fn describe(start: &Bound, end: &Bound) -> String {
    format!("({}, {})", start, end)
}
