//! # Error Hierarchy
//!
//! Validation errors for the domain primitives, built with `thiserror`.
//! Crates with their own failure modes (store, quote, API) define local
//! enums and convert from these where they cross a boundary.

use thiserror::Error;

/// Validation errors for domain primitives.
///
/// Each variant carries the rejected input so operators can see exactly
/// what was supplied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier was negative. Zero is accepted as "not provided".
    #[error("invalid {kind} identifier: {value} (expected a non-negative integer)")]
    NegativeId {
        /// Which identifier namespace was rejected.
        kind: &'static str,
        /// The rejected raw value.
        value: i64,
    },

    /// Timestamp string could not be parsed or was not UTC.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Unix epoch seconds outside the representable range.
    #[error("invalid Unix timestamp: {0}")]
    EpochOutOfRange(i64),

    /// Decimal amount could not be parsed.
    #[error("invalid decimal amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}
