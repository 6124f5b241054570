//! # rangedb
//!
//! A small key-value engine contract with bounded range iteration.
//!
//! ## Features
//!
//! - **Engine trait**: `get`, `set`, `delete`, forward and reverse range
//!   cursors, callback scans with early stop
//! - **Bounds**: each end of an interval is unbounded, inclusive or exclusive
//! - **Backends**: `BTreeMap`, lock-free skip list, sorted vector
//! - **Shared access**: `SharedEngine` for many readers and one writer
//! - **Conformance suite**: reusable checks any backend can run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rangedb::{open, Bound, Engine, Options};
//!
//! let mut engine = open(&Options::default())?;
//! engine.set("a", b"1");
//! engine.set("b", b"2");
//! engine.set("c", b"3");
//!
//! let mut iter = engine.iter(&Bound::include("a"), &Bound::exclude("c"));
//! while iter.is_valid() {
//!     println!("{} = {:?}", iter.key(), iter.value());
//!     iter.next();
//! }
//!
//! engine.reverse(&Bound::NoBound, &Bound::NoBound, &mut |key, _| {
//!     println!("{}", key);
//!     key != "b"
//! });
//! ```

pub mod conformance;
pub mod engine;
pub mod error;
pub mod iterator;
pub mod options;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use options::{EngineKind, Options, OptionsBuilder};
pub use types::{Bound, Entry};

// Engines
pub use engine::{open, BTreeEngine, Engine, SharedEngine, SkipListEngine, SortedVecEngine};

// Iterators
pub use iterator::{EngineIterator, IteratorDirection};

// Conformance
pub use conformance::{Report, Suite};
