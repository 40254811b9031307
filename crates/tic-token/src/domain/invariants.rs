//! # Domain Invariants
//!
//! Invariants that MUST hold for every reachable ledger state.
//!
//! - INVARIANT-1: Conservation (sum of balances == total supply)
//! - INVARIANT-2: Canonical storage (no zero balances or allowances stored)
//! - INVARIANT-3: No state change and no event on failure

use crate::domain::engine::TokenState;
use crate::domain::value_objects::Amount;
use serde::{Deserialize, Serialize};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Conservation
///
/// No operation creates or destroys units.
#[must_use]
pub fn check_conservation_invariant(state: &TokenState) -> bool {
    state.ledger().sum_of_balances() == Some(state.total_supply())
}

/// INVARIANT-2: Canonical storage
///
/// Zero balances and zero allowances are represented by absence, so "unset"
/// and "zero" can never diverge.
#[must_use]
pub fn check_canonical_storage_invariant(state: &TokenState) -> bool {
    state.ledger().holders().all(|(_, v)| !v.is_zero())
        && state.allowances().entries().all(|(_, v)| !v.is_zero())
}

/// INVARIANT-3: Failure leaves no trace
///
/// Compares state before and after a failed operation.
#[must_use]
pub fn check_failure_rollback_invariant(before: &TokenState, after: &TokenState) -> bool {
    before == after
}

/// Check all single-state invariants at once.
#[must_use]
pub fn check_all_invariants(state: &TokenState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_conservation_invariant(state) {
        violations.push(InvariantViolation::SupplyMismatch {
            total_supply: state.total_supply(),
            sum_of_balances: state.ledger().sum_of_balances(),
        });
    }

    if !check_canonical_storage_invariant(state) {
        violations.push(InvariantViolation::ZeroEntryStored);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvariantViolation {
    /// Balances do not sum to the total supply (`None` means the sum overflowed).
    SupplyMismatch {
        /// Fixed supply recorded by the ledger.
        total_supply: Amount,
        /// Sum of all stored balances.
        sum_of_balances: Option<Amount>,
    },
    /// A zero balance or zero allowance is stored explicitly.
    ZeroEntryStored,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SupplyMismatch {
                total_supply,
                sum_of_balances: Some(sum),
            } => write!(f, "supply mismatch: balances sum to {sum}, supply is {total_supply}"),
            Self::SupplyMismatch {
                total_supply,
                sum_of_balances: None,
            } => write!(f, "supply mismatch: balances overflow, supply is {total_supply}"),
            Self::ZeroEntryStored => write!(f, "zero balance or allowance stored explicitly"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
