//! # Ledger
//!
//! Authoritative mapping from account to balance.
//!
//! Only accounts with a non-zero balance are stored; an absent entry reads
//! as zero. The total supply is fixed at construction and the sum of all
//! stored balances always equals it.

use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::TokenError;
use std::collections::BTreeMap;

/// Per-account balances plus the immutable total supply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    total_supply: Amount,
    balances: BTreeMap<AccountId, Amount>,
}

impl Ledger {
    /// Create a ledger with the whole `total_supply` credited to `initial_holder`.
    #[must_use]
    pub fn new(initial_holder: AccountId, total_supply: Amount) -> Self {
        let mut balances = BTreeMap::new();
        if !total_supply.is_zero() {
            balances.insert(initial_holder, total_supply);
        }
        Self {
            total_supply,
            balances,
        }
    }

    /// Rebuild a ledger from raw parts. Callers must validate conservation.
    pub(crate) fn from_parts(total_supply: Amount, balances: BTreeMap<AccountId, Amount>) -> Self {
        Self {
            total_supply,
            balances,
        }
    }

    /// Fixed total supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `account`; zero when unknown.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Accounts holding a non-zero balance, in account order.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &Amount)> {
        self.balances.iter()
    }

    /// Number of accounts holding a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of all stored balances. `None` if the sum overflows `U256`,
    /// which can only happen for a corrupted ledger.
    #[must_use]
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, v| acc.checked_add(*v))
    }

    /// Fails with `InsufficientBalance` if `account` cannot cover `amount`.
    pub fn ensure_covers(&self, account: &AccountId, amount: Amount) -> Result<(), TokenError> {
        let available = self.balance_of(account);
        if amount > available {
            return Err(TokenError::InsufficientBalance {
                account: *account,
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Add `amount` to `account`.
    ///
    /// Cannot overflow while conservation holds: every balance is bounded by
    /// the total supply.
    pub(crate) fn credit(&mut self, account: &AccountId, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        let balance = self.balances.entry(*account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Subtract `amount` from `account`. On failure nothing changes.
    pub(crate) fn debit(&mut self, account: &AccountId, amount: Amount) -> Result<(), TokenError> {
        self.ensure_covers(account, amount)?;
        if amount.is_zero() {
            return Ok(());
        }
        let remaining = self.balance_of(account) - amount;
        if remaining.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, remaining);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
