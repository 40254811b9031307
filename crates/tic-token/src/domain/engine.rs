//! # Transfer Engine
//!
//! The only code path that mutates the [`Ledger`] or the [`AllowanceStore`].
//!
//! Every operation is validated against `&TokenState` first and applied only
//! when validation passes, so a failed operation never leaves partial state.
//! The same validation backs [`TokenState::simulate`], which evaluates an
//! operation's outcome without touching state.

use crate::domain::allowances::AllowanceStore;
use crate::domain::ledger::Ledger;
use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::TokenError;
use crate::events::TokenEvent;

// =============================================================================
// OPERATIONS
// =============================================================================

/// A mutating ledger operation with every participant made explicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Move `value` from `from` to `to`.
    Transfer {
        /// Caller, debited.
        from: AccountId,
        /// Recipient.
        to: AccountId,
        /// Amount moved.
        value: Amount,
    },
    /// Set `spender`'s allowance over `owner`'s balance to exactly `value`.
    Approve {
        /// Caller granting the allowance.
        owner: AccountId,
        /// Account allowed to spend.
        spender: AccountId,
        /// New allowance, replacing any previous one.
        value: Amount,
    },
    /// `spender` moves `value` from `owner` to `to`, consuming allowance.
    TransferFrom {
        /// Caller, spending the allowance.
        spender: AccountId,
        /// Account debited.
        owner: AccountId,
        /// Recipient.
        to: AccountId,
        /// Amount moved and allowance consumed.
        value: Amount,
    },
}

impl Operation {
    /// Operation name for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transfer_from",
        }
    }

    /// Check whether this operation would succeed against `state`.
    ///
    /// For `TransferFrom` the balance check runs before the allowance check,
    /// so `InsufficientBalance` wins when both fail.
    pub fn validate(&self, state: &TokenState) -> Result<(), TokenError> {
        match *self {
            Self::Transfer { from, value, .. } => state.ledger.ensure_covers(&from, value),
            Self::Approve { .. } => Ok(()),
            Self::TransferFrom {
                spender,
                owner,
                value,
                ..
            } => {
                state.ledger.ensure_covers(&owner, value)?;
                state.allowances.ensure_covers(&owner, &spender, value)
            }
        }
    }

    /// The event this operation emits on success.
    #[must_use]
    pub fn event(&self) -> TokenEvent {
        match *self {
            Self::Transfer { from, to, value } => TokenEvent::Transfer { from, to, value },
            Self::Approve {
                owner,
                spender,
                value,
            } => TokenEvent::Approval {
                owner,
                spender,
                value,
            },
            Self::TransferFrom {
                owner, to, value, ..
            } => TokenEvent::Transfer {
                from: owner,
                to,
                value,
            },
        }
    }
}

// =============================================================================
// TOKEN STATE
// =============================================================================

/// Combined ledger and allowance state. This is the unit guarded by the
/// service's exclusive-access boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenState {
    pub(crate) ledger: Ledger,
    pub(crate) allowances: AllowanceStore,
}

impl TokenState {
    /// Fresh state with `total_supply` credited to `initial_holder` and no
    /// allowances.
    #[must_use]
    pub fn new(initial_holder: AccountId, total_supply: Amount) -> Self {
        Self {
            ledger: Ledger::new(initial_holder, total_supply),
            allowances: AllowanceStore::new(),
        }
    }

    pub(crate) fn from_parts(ledger: Ledger, allowances: AllowanceStore) -> Self {
        Self { ledger, allowances }
    }

    /// Read access to balances.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Read access to allowances.
    #[must_use]
    pub fn allowances(&self) -> &AllowanceStore {
        &self.allowances
    }

    /// Fixed total supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    /// Remaining allowance from `owner` to `spender`.
    #[must_use]
    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances.allowance_of(owner, spender)
    }

    /// Evaluate `op` without committing it. Returns the event the real
    /// operation would emit.
    pub fn simulate(&self, op: &Operation) -> Result<TokenEvent, TokenError> {
        op.validate(self)?;
        Ok(op.event())
    }

    /// Validate and apply `op` atomically.
    pub fn apply(&mut self, op: &Operation) -> Result<TokenEvent, TokenError> {
        op.validate(self)?;
        match *op {
            Operation::Transfer { from, to, value } => {
                self.ledger.debit(&from, value)?;
                self.ledger.credit(&to, value);
            }
            Operation::Approve {
                owner,
                spender,
                value,
            } => {
                self.allowances.set_allowance(&owner, &spender, value);
            }
            Operation::TransferFrom {
                spender,
                owner,
                to,
                value,
            } => {
                self.allowances.consume_allowance(&owner, &spender, value)?;
                self.ledger.debit(&owner, value)?;
                self.ledger.credit(&to, value);
            }
        }
        Ok(op.event())
    }

    /// `transfer(from, to, value)`.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<TokenEvent, TokenError> {
        self.apply(&Operation::Transfer { from, to, value })
    }

    /// `approve(owner, spender, value)`. Never fails.
    pub fn approve(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<TokenEvent, TokenError> {
        self.apply(&Operation::Approve {
            owner,
            spender,
            value,
        })
    }

    /// `transfer_from(spender, owner, to, value)`.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<TokenEvent, TokenError> {
        self.apply(&Operation::TransferFrom {
            spender,
            owner,
            to,
            value,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
