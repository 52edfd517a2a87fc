//! Error type shared by all generators.
//!
//! Every variant names the configuration field (or input) at fault so callers
//! can report it without re-deriving context. Failures surface from
//! `generate`; configuration setters never fail.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenError {
    #[error("{field}: low bound {low} exceeds high bound {high}")]
    InvalidInterval {
        field: &'static str,
        low: f64,
        high: f64,
    },
    #[error("{field}: bound {value} is not finite")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field}: min count {min} exceeds max count {max}")]
    InvalidCount {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("{field}: radius bound {value} must be > 0")]
    NonPositiveRadius { field: &'static str, value: f64 },
    #[error("malformed {what}: {reason}")]
    MalformedInput { what: &'static str, reason: String },
    #[error("{dependency} failed: {reason}")]
    External {
        dependency: &'static str,
        reason: String,
    },
}

impl GenError {
    pub(crate) fn malformed(what: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            what,
            reason: reason.into(),
        }
    }

    pub(crate) fn external(dependency: &'static str, reason: impl Into<String>) -> Self {
        Self::External {
            dependency,
            reason: reason.into(),
        }
    }

    /// Field name or input the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInterval { field, .. }
            | Self::NonFinite { field, .. }
            | Self::InvalidCount { field, .. }
            | Self::NonPositiveRadius { field, .. } => field,
            Self::MalformedInput { what, .. } => what,
            Self::External { dependency, .. } => dependency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field_and_values() {
        let err = GenError::InvalidInterval {
            field: "x_range",
            low: 5.0,
            high: -1.0,
        };
        assert_eq!(err.to_string(), "x_range: low bound 5 exceeds high bound -1");
        assert_eq!(err.field(), "x_range");
    }

    #[test]
    fn external_failure_keeps_reason() {
        let err = GenError::external("cell indexer", "native library missing");
        assert_eq!(err.field(), "cell indexer");
        assert!(err.to_string().contains("native library missing"));
    }
}
