//! # Allowance Store
//!
//! Spending authorizations keyed by (owner, spender). Absent entries read as
//! zero, and a zero allowance is never stored.

use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::TokenError;
use std::collections::BTreeMap;

/// Mapping from (owner, spender) to the amount the spender may still move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowanceStore {
    entries: BTreeMap<(AccountId, AccountId), Amount>,
}

impl AllowanceStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining allowance from `owner` to `spender`; zero when unset.
    #[must_use]
    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.entries
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// All non-zero allowances as `((owner, spender), amount)`.
    pub fn entries(&self) -> impl Iterator<Item = (&(AccountId, AccountId), &Amount)> {
        self.entries.iter()
    }

    /// Number of non-zero allowances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no allowance is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrite the allowance. Zero revokes.
    pub(crate) fn set_allowance(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        if amount.is_zero() {
            self.entries.remove(&(*owner, *spender));
        } else {
            self.entries.insert((*owner, *spender), amount);
        }
    }

    /// Fails with `InsufficientAllowance` if the allowance cannot cover `amount`.
    pub fn ensure_covers(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let available = self.allowance_of(owner, spender);
        if amount > available {
            return Err(TokenError::InsufficientAllowance {
                owner: *owner,
                spender: *spender,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Reduce the allowance by `amount`. On failure nothing changes.
    pub(crate) fn consume_allowance(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.ensure_covers(owner, spender, amount)?;
        let remaining = self.allowance_of(owner, spender) - amount;
        self.set_allowance(owner, spender, remaining);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
