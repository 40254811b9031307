//! # TicToken - Fungible Token Ledger
//!
//! Per-account balances with a fixed total supply, plus delegated spending
//! through allowances.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Conservation | `domain/invariants.rs` - `check_conservation_invariant()` |
//! | INVARIANT-2 | Canonical Storage | `domain/invariants.rs` - `check_canonical_storage_invariant()` |
//! | INVARIANT-3 | No State Change on Failure | `domain/engine.rs` - validate before apply |
//! | INVARIANT-4 | Gap-Free Event Sequence | `service.rs` - sequence assigned under lock |
//!
//! ## Operations
//!
//! | Operation | Fails With | Emits |
//! |-----------|-----------|-------|
//! | `transfer` | `InsufficientBalance` | `Transfer` |
//! | `approve` | never | `Approval` |
//! | `transfer_from` | `InsufficientBalance`, then `InsufficientAllowance` | `Transfer` |
//!
//! Each mutating operation has a speculative twin (`call_*`) that reports the
//! same verdict without mutating or emitting.
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `EventSink` | Receives committed event records |
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tic_token::prelude::*;
//!
//! let log = Arc::new(InMemoryEventLog::new());
//! let token = TokenService::new(ServiceConfig::default(), deployer, log.clone())?;
//!
//! let receipt = token.transfer(deployer, alice, Amount::from(250_000))?;
//! assert_eq!(receipt.logs[0].sequence, 0);
//! ```

// Crate-level lints
#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{AccountId, Amount, ParseAccountIdError, U256};

    // Domain
    pub use crate::domain::{
        AllowanceEntry, AllowanceStore, BalanceEntry, Ledger, LedgerSnapshot, Operation,
        TokenState,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, check_conservation_invariant, InvariantCheckResult,
        InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::{Receipt, TokenApi};
    pub use crate::ports::outbound::EventSink;

    // Events
    pub use crate::events::{topics, EventRecord, TokenEvent};

    // Errors
    pub use crate::errors::{ConfigError, SnapshotError, TokenError};

    // Config
    pub use crate::config::TokenConfig;

    // Adapters
    pub use crate::adapters::{
        BroadcastEventSink, EventFilter, FanOutSink, InMemoryEventLog, NullEventSink,
        Subscription, SubscriptionError,
    };

    // Service
    pub use crate::service::{ServiceConfig, ServiceStats, TokenService};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
