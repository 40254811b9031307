//! # Error Types
//!
//! All error types for the token ledger.

use crate::domain::invariants::InvariantViolation;
use crate::domain::value_objects::{AccountId, Amount};
use thiserror::Error;

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Failure of a mutating (or speculative) token operation.
///
/// Both variants are terminal: the operation left no trace in the ledger
/// and emitted no event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Requested value exceeds the source account's balance.
    #[error("insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Account being debited.
        account: AccountId,
        /// Value the operation needed.
        required: Amount,
        /// Balance held at the time.
        available: Amount,
    },

    /// Requested value exceeds the spender's remaining authorization.
    #[error(
        "insufficient allowance from {owner} to {spender}: required {required}, available {available}"
    )]
    InsufficientAllowance {
        /// Account that granted the allowance.
        owner: AccountId,
        /// Account spending it.
        spender: AccountId,
        /// Value the operation needed.
        required: Amount,
        /// Allowance remaining at the time.
        available: Amount,
    },
}

impl TokenError {
    /// Short label used for metrics and log fields.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::InsufficientAllowance { .. } => "insufficient_allowance",
        }
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from loading [`crate::config::TokenConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Name of the offending environment variable.
        var: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Total supply must be positive.
    #[error("initial supply must be greater than zero")]
    ZeroSupply,
}

// =============================================================================
// SNAPSHOT ERRORS
// =============================================================================

/// Errors from decoding or restoring a ledger snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot bytes were not valid JSON for the snapshot schema.
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The same balance or allowance key appeared twice.
    #[error("duplicate snapshot entry: {0}")]
    DuplicateEntry(String),

    /// Restored state does not satisfy the ledger invariants.
    #[error("snapshot violates ledger invariants: {0:?}")]
    InvariantViolated(Vec<InvariantViolation>),
}

// =============================================================================
// TESTS
// =============================================================================
