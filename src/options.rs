//! Configuration options for rangedb.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Largest accepted `capacity_hint` (entries preallocated up front).
pub const MAX_CAPACITY_HINT: usize = 64 * 1024 * 1024;

/// Environment variable selecting the backend for [`Options::from_env`].
pub const ENV_ENGINE: &str = "RANGEDB_ENGINE";

/// Environment variable setting the capacity hint for [`Options::from_env`].
pub const ENV_CAPACITY_HINT: &str = "RANGEDB_CAPACITY_HINT";

/// Which backend [`crate::open`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    /// `BTreeMap`-backed engine.
    #[default]
    BTree,
    /// Lock-free skip list engine.
    SkipList,
    /// Sorted vector engine.
    SortedVec,
}

impl EngineKind {
    /// Every backend, in a stable order.
    pub const ALL: [EngineKind; 3] = [EngineKind::BTree, EngineKind::SkipList, EngineKind::SortedVec];

    /// Canonical name, as accepted by `FromStr` and reported by `Engine::name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::BTree => "btree",
            EngineKind::SkipList => "skiplist",
            EngineKind::SortedVec => "sorted",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "btree" => Ok(EngineKind::BTree),
            "skiplist" => Ok(EngineKind::SkipList),
            "sorted" => Ok(EngineKind::SortedVec),
            other => Err(Error::invalid_config(format!(
                "unknown engine `{}` (expected btree, skiplist or sorted)",
                other
            ))),
        }
    }
}

/// Engine configuration options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Backend to build.
    pub engine: EngineKind,

    /// Number of entries to preallocate. Only the sorted backend uses it.
    pub capacity_hint: usize,
}

impl Options {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from `RANGEDB_ENGINE` and `RANGEDB_CAPACITY_HINT`.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> crate::Result<Self> {
        let mut options = Options::default();

        if let Ok(engine) = env::var(ENV_ENGINE) {
            options.engine = engine.parse()?;
        }

        if let Ok(hint) = env::var(ENV_CAPACITY_HINT) {
            options.capacity_hint = hint.trim().parse().map_err(|_| {
                Error::invalid_config(format!(
                    "{} must be a non-negative integer, got `{}`",
                    ENV_CAPACITY_HINT, hint
                ))
            })?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Validate the options.
    pub fn validate(&self) -> crate::Result<()> {
        if self.capacity_hint > MAX_CAPACITY_HINT {
            return Err(Error::invalid_config(format!(
                "capacity_hint cannot exceed {}",
                MAX_CAPACITY_HINT
            )));
        }

        Ok(())
    }
}

/// Builder for Options.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend.
    pub fn engine(mut self, kind: EngineKind) -> Self {
        self.options.engine = kind;
        self
    }

    /// Set the capacity hint.
    pub fn capacity_hint(mut self, entries: usize) -> Self {
        self.options.capacity_hint = entries;
        self
    }

    /// Build the options.
    pub fn build(self) -> crate::Result<Options> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert_eq!(opts.engine, EngineKind::BTree);
        assert_eq!(opts.capacity_hint, 0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_options_validation() {
        let mut opts = Options::default();
        opts.capacity_hint = MAX_CAPACITY_HINT;
        assert!(opts.validate().is_ok());

        opts.capacity_hint = MAX_CAPACITY_HINT + 1;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("btree".parse::<EngineKind>().unwrap(), EngineKind::BTree);
        assert_eq!(" SkipList ".parse::<EngineKind>().unwrap(), EngineKind::SkipList);
        assert_eq!("sorted".parse::<EngineKind>().unwrap(), EngineKind::SortedVec);

        let err = "lsm".parse::<EngineKind>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_engine_kind_round_trip_names() {
        for kind in EngineKind::ALL {
            assert_eq!(kind.to_string().parse::<EngineKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_options_builder() {
        let opts = OptionsBuilder::new()
            .engine(EngineKind::SortedVec)
            .capacity_hint(1024)
            .build()
            .unwrap();

        assert_eq!(opts.engine, EngineKind::SortedVec);
        assert_eq!(opts.capacity_hint, 1024);

        assert!(OptionsBuilder::new()
            .capacity_hint(MAX_CAPACITY_HINT + 1)
            .build()
            .is_err());
    }
}
