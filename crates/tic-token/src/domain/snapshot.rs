//! # Ledger Snapshots
//!
//! Serializable image of [`TokenState`] for hosts that persist the ledger
//! between runs. Restoring re-validates every invariant before the state is
//! accepted.

use crate::domain::allowances::AllowanceStore;
use crate::domain::engine::TokenState;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::ledger::Ledger;
use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::SnapshotError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One account balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Holder.
    pub account: AccountId,
    /// Non-zero balance.
    pub balance: Amount,
}

/// One allowance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    /// Granting account.
    pub owner: AccountId,
    /// Authorized account.
    pub spender: AccountId,
    /// Non-zero remaining allowance.
    pub value: Amount,
}

/// Full ledger image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Fixed total supply.
    pub total_supply: Amount,
    /// Sequence number the next event will carry.
    pub next_sequence: u64,
    /// Non-zero balances in account order.
    pub balances: Vec<BalanceEntry>,
    /// Non-zero allowances in (owner, spender) order.
    pub allowances: Vec<AllowanceEntry>,
}

impl LedgerSnapshot {
    /// Capture `state` together with the event sequence position.
    #[must_use]
    pub fn capture(state: &TokenState, next_sequence: u64) -> Self {
        Self {
            total_supply: state.total_supply(),
            next_sequence,
            balances: state
                .ledger()
                .holders()
                .map(|(account, balance)| BalanceEntry {
                    account: *account,
                    balance: *balance,
                })
                .collect(),
            allowances: state
                .allowances()
                .entries()
                .map(|((owner, spender), value)| AllowanceEntry {
                    owner: *owner,
                    spender: *spender,
                    value: *value,
                })
                .collect(),
        }
    }

    /// Decode from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Rebuild the state. Zero entries are dropped; duplicates and
    /// conservation failures are rejected.
    pub fn restore(&self) -> Result<TokenState, SnapshotError> {
        let mut balances = BTreeMap::new();
        for entry in &self.balances {
            if balances.insert(entry.account, entry.balance).is_some() {
                return Err(SnapshotError::DuplicateEntry(format!(
                    "balance {}",
                    entry.account.to_hex()
                )));
            }
        }
        balances.retain(|_, v: &mut Amount| !v.is_zero());

        let mut seen = BTreeSet::new();
        let mut allowances = AllowanceStore::new();
        for entry in &self.allowances {
            if !seen.insert((entry.owner, entry.spender)) {
                return Err(SnapshotError::DuplicateEntry(format!(
                    "allowance {} -> {}",
                    entry.owner.to_hex(),
                    entry.spender.to_hex()
                )));
            }
            allowances.set_allowance(&entry.owner, &entry.spender, entry.value);
        }

        let state = TokenState::from_parts(Ledger::from_parts(self.total_supply, balances), allowances);
        match check_all_invariants(&state) {
            InvariantCheckResult::Valid => Ok(state),
            InvariantCheckResult::Invalid(violations) => {
                Err(SnapshotError::InvariantViolated(violations))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
