//! # Driving Ports (API - Inbound)
//!
//! The interface the host uses to query and mutate the ledger.
//!
//! The `caller` parameter on mutating operations is the account on whose
//! authority the call runs: the sender for `transfer`, the owner for
//! `approve`, and the spender for `transfer_from`.

use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::TokenError;
use crate::events::EventRecord;

// =============================================================================
// RECEIPT
// =============================================================================

/// Outcome of a committed mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Events emitted by the call. Exactly one for every ledger operation.
    pub logs: Vec<EventRecord>,
}

impl Receipt {
    /// A committed call always succeeded; failures are reported as `Err`.
    #[must_use]
    pub fn success(&self) -> bool {
        true
    }

    /// The single event emitted by the call.
    #[must_use]
    pub fn event(&self) -> Option<&EventRecord> {
        self.logs.first()
    }
}

// =============================================================================
// TOKEN API (Primary Driving Port)
// =============================================================================

/// Primary API for the token ledger.
///
/// ## Usage
///
/// ```ignore
/// let receipt = api.transfer(alice, bob, Amount::from(250_000))?;
/// assert_eq!(receipt.logs.len(), 1);
///
/// // Dry run: same verdict as the real call, no state change, no event.
/// assert!(api.call_transfer(alice, bob, Amount::from(25_000))?);
/// ```
pub trait TokenApi: Send + Sync {
    // === Metadata ===

    /// Token name.
    fn name(&self) -> &str;

    /// Token symbol.
    fn symbol(&self) -> &str;

    /// Standard/version string.
    fn standard(&self) -> &str;

    // === Queries ===

    /// Fixed total supply.
    fn total_supply(&self) -> Amount;

    /// Balance of `account`; zero when unknown.
    fn balance_of(&self, account: AccountId) -> Amount;

    /// Remaining allowance from `owner` to `spender`; zero when unset.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount;

    // === Mutations ===

    /// Move `value` from `caller` to `to`.
    fn transfer(&self, caller: AccountId, to: AccountId, value: Amount)
        -> Result<Receipt, TokenError>;

    /// Set `spender`'s allowance over `caller`'s balance to exactly `value`.
    fn approve(
        &self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<Receipt, TokenError>;

    /// Move `value` from `owner` to `to` on `caller`'s allowance.
    fn transfer_from(
        &self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<Receipt, TokenError>;

    // === Speculative evaluation ===

    /// Would `transfer` succeed? Never mutates, never emits.
    fn call_transfer(
        &self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError>;

    /// Would `approve` succeed? Never mutates, never emits.
    fn call_approve(
        &self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError>;

    /// Would `transfer_from` succeed? Never mutates, never emits.
    fn call_transfer_from(
        &self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError>;
}

// =============================================================================
// TESTS
// =============================================================================
