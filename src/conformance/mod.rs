//! Reusable conformance suite for [`Engine`] implementations.
//!
//! Every check takes a fresh, empty engine and returns
//! [`Error::Conformance`] on the first violation it sees. The suite only
//! talks to engines through the `Engine` trait, so third-party backends
//! run exactly the same checks as the built-in ones.
//!
//! ```rust,ignore
//! use rangedb::conformance::Suite;
//! use rangedb::BTreeEngine;
//!
//! let report = Suite::new(BTreeEngine::new).run()?;
//! assert!(report.is_complete());
//! ```
//!
//! In a test crate, [`engine_conformance_tests!`](crate::engine_conformance_tests)
//! expands the suite into one `#[test]` per check.

mod fixture;
mod point;
mod range;

pub use fixture::{load_fixture, reference_entries, FIXTURE, PROBE_KEYS};
pub use point::{absent_key, case_sensitivity, delete_absent, get_set, overwrite};
pub use range::{
    bound_cross_product, empty_store_scans, exhaustion_is_idempotent, forward_ranges,
    inverted_intervals, reverse_ranges, scan_early_stop, scan_matches_iter,
};

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::error::{Error, Result};

/// A single conformance check.
pub type Check = fn(&mut dyn Engine) -> Result<()>;

/// Every check, in the order [`Suite::run`] executes them.
pub const CHECKS: &[(&str, Check)] = &[
    ("absent_key", absent_key),
    ("get_set", get_set),
    ("overwrite", overwrite),
    ("delete_absent", delete_absent),
    ("case_sensitivity", case_sensitivity),
    ("empty_store_scans", empty_store_scans),
    ("forward_ranges", forward_ranges),
    ("bound_cross_product", bound_cross_product),
    ("reverse_ranges", reverse_ranges),
    ("scan_matches_iter", scan_matches_iter),
    ("scan_early_stop", scan_early_stop),
    ("inverted_intervals", inverted_intervals),
    ("exhaustion_is_idempotent", exhaustion_is_idempotent),
];

/// Outcome of a full [`Suite::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Backend identifier, from [`Engine::name`].
    pub engine: &'static str,
    /// Checks that passed, in execution order.
    pub passed: Vec<&'static str>,
}

impl Report {
    /// Whether every registered check passed.
    pub fn is_complete(&self) -> bool {
        self.passed.len() == CHECKS.len()
    }
}

/// Runs the conformance checks against engines built by a factory.
pub struct Suite<F> {
    factory: F,
}

impl<F, E> Suite<F>
where
    F: Fn() -> E,
    E: Engine,
{
    /// Create a suite. `factory` must return a fresh, empty engine on
    /// every call.
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Run every check, each on its own fresh engine.
    ///
    /// Stops at the first failing check and returns its error.
    pub fn run(&self) -> Result<Report> {
        let mut engine_name = "";
        let mut passed = Vec::with_capacity(CHECKS.len());

        for &(name, check) in CHECKS {
            engine_name = self.run_one(name, check)?;
            passed.push(name);
        }

        debug!(engine = engine_name, passed = passed.len(), "conformance suite passed");
        Ok(Report {
            engine: engine_name,
            passed,
        })
    }

    /// Run one check by name on a fresh engine.
    pub fn run_check(&self, name: &str) -> Result<()> {
        let (name, check) = CHECKS
            .iter()
            .find(|(n, _)| *n == name)
            .copied()
            .ok_or_else(|| Error::UnknownCheck(name.to_string()))?;
        self.run_one(name, check).map(|_| ())
    }

    fn run_one(&self, name: &'static str, check: Check) -> Result<&'static str> {
        let mut engine = (self.factory)();
        let engine_name = engine.name();
        debug!(engine = engine_name, check = name, "running conformance check");

        match check(&mut engine) {
            Ok(()) => {
                debug!(engine = engine_name, check = name, "conformance check passed");
                Ok(engine_name)
            }
            Err(err) => {
                warn!(engine = engine_name, check = name, error = %err, "conformance check failed");
                Err(err)
            }
        }
    }
}

/// Expand the conformance suite into one `#[test]` per check.
///
/// `$factory` is an expression evaluated once per test; it must yield a
/// fresh, empty value implementing `Engine` (boxed engines work too).
///
/// ```rust,ignore
/// rangedb::engine_conformance_tests!(btree, rangedb::BTreeEngine::new());
/// ```
#[macro_export]
macro_rules! engine_conformance_tests {
    ($module:ident, $factory:expr) => {
        $crate::engine_conformance_tests!(
            @checks $module, $factory,
            absent_key,
            get_set,
            overwrite,
            delete_absent,
            case_sensitivity,
            empty_store_scans,
            forward_ranges,
            bound_cross_product,
            reverse_ranges,
            scan_matches_iter,
            scan_early_stop,
            inverted_intervals,
            exhaustion_is_idempotent,
        );
    };
    (@checks $module:ident, $factory:expr, $($check:ident),+ $(,)?) => {
        mod $module {
            #[allow(unused_imports)]
            use super::*;

            $(
                #[test]
                fn $check() {
                    let mut engine = $factory;
                    if let Err(err) = $crate::conformance::$check(&mut engine) {
                        panic!("{}", err);
                    }
                }
            )+
        }
    };
}
