//! Error types for rangedb.
//!
//! The engine contract itself is total: `get`, `set`, `delete` and the
//! iterator operations never fail. Errors only come from the surfaces
//! around it (configuration and the conformance harness).

use thiserror::Error;

/// Result type alias for rangedb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the non-contract surfaces of the crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An engine violated the contract during a conformance check.
    #[error("Conformance check `{check}` failed: {detail}")]
    Conformance {
        /// Name of the failing check.
        check: &'static str,
        /// What was observed.
        detail: String,
    },

    /// A conformance check was requested by a name the suite does not know.
    #[error("Unknown conformance check: {0}")]
    UnknownCheck(String),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    /// Create a conformance violation for `check`.
    pub fn conformance<S: Into<String>>(check: &'static str, detail: S) -> Self {
        Error::Conformance {
            check,
            detail: detail.into(),
        }
    }

    /// Check if this error is a contract violation reported by the suite.
    pub fn is_conformance(&self) -> bool {
        matches!(self, Error::Conformance { .. })
    }

    /// Name of the failing check, if this is a conformance error.
    pub fn check(&self) -> Option<&'static str> {
        match self {
            Error::Conformance { check, .. } => Some(check),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_config("unknown engine `lsm`");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: unknown engine `lsm`"
        );

        let err = Error::conformance("overwrite", "expected Some(\"v2\"), got Some(\"v1\")");
        assert_eq!(
            format!("{}", err),
            "Conformance check `overwrite` failed: expected Some(\"v2\"), got Some(\"v1\")"
        );
    }

    #[test]
    fn test_error_is_conformance() {
        let err = Error::conformance("get_set", "bad");
        assert!(err.is_conformance());
        assert_eq!(err.check(), Some("get_set"));

        let err = Error::UnknownCheck("nope".into());
        assert!(!err.is_conformance());
        assert_eq!(err.check(), None);
    }
}
