//! # Event Schema
//!
//! Event records produced by the transfer engine. Field names and order are
//! part of the contract consumed by downstream listeners, so they are kept
//! stable across serialization.
//!
//! | Event | Fields | Emitted by |
//! |-------|--------|------------|
//! | `Transfer` | `from`, `to`, `value` | `transfer`, `transfer_from` |
//! | `Approval` | `owner`, `spender`, `value` | `approve` |

use crate::domain::value_objects::{AccountId, Amount};
use serde::{Deserialize, Serialize};

// =============================================================================
// TOKEN EVENTS
// =============================================================================

/// A single ledger event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TokenEvent {
    /// Units moved from one account to another.
    Transfer {
        /// Account debited (the owner for delegated transfers).
        from: AccountId,
        /// Account credited.
        to: AccountId,
        /// Amount moved.
        value: Amount,
    },
    /// An owner set a spender's allowance.
    Approval {
        /// Account whose balance may be spent.
        owner: AccountId,
        /// Account authorized to spend.
        spender: AccountId,
        /// New allowance (overwrites the previous one).
        value: Amount,
    },
}

impl TokenEvent {
    /// Event name as exposed to listeners.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
        }
    }

    /// Topic this event is published under.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => topics::TRANSFER,
            Self::Approval { .. } => topics::APPROVAL,
        }
    }

    /// Amount carried by the event.
    #[must_use]
    pub fn value(&self) -> Amount {
        match self {
            Self::Transfer { value, .. } | Self::Approval { value, .. } => *value,
        }
    }
}

/// A sequenced event as handed to sinks.
///
/// `sequence` starts at 0 and increases by exactly one per committed
/// mutation, so listeners can detect gaps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the ledger's event stream.
    pub sequence: u64,
    /// The event itself.
    #[serde(flatten)]
    pub event: TokenEvent,
}

// =============================================================================
// EVENT TOPICS
// =============================================================================

/// Topic names for event consumers.
pub mod topics {
    /// Topic for `Transfer` events.
    pub const TRANSFER: &str = "tic_token.transfer";

    /// Topic for `Approval` events.
    pub const APPROVAL: &str = "tic_token.approval";
}

// =============================================================================
// TESTS
// =============================================================================
