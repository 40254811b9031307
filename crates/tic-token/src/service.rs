//! # Token Service
//!
//! Thread-safe host for [`TokenState`]. Implements [`TokenApi`] and hands
//! every committed event to the injected [`EventSink`].
//!
//! ## Commit Order
//!
//! 1. Lock the state
//! 2. Validate and apply through [`TokenState::apply`]
//! 3. Assign the next sequence number
//! 4. Unlock the state
//! 5. Wait for this sequence's turn at the emit gate, then emit
//!
//! The emit gate holds the sequence number due next at the sink, so records
//! reach the sink in sequence order even when callers race. The state lock
//! is never held while waiting or emitting, so readers are never blocked by
//! a slow sink.

use crate::config::TokenConfig;
use crate::domain::engine::{Operation, TokenState};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::snapshot::LedgerSnapshot;
use crate::domain::value_objects::{AccountId, Amount};
use crate::errors::{ConfigError, SnapshotError, TokenError};
use crate::events::EventRecord;
use crate::ports::inbound::{Receipt, TokenApi};
use crate::ports::outbound::EventSink;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, error, info, instrument, warn};

/// Token Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Token metadata and supply.
    pub token: TokenConfig,
    /// Re-verify the ledger invariants after every committed mutation.
    pub check_invariants: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            check_invariants: cfg!(debug_assertions),
        }
    }
}

impl ServiceConfig {
    /// Service configuration around the given token configuration.
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }
}

/// Statistics for the Token Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Committed direct transfers.
    pub transfers: u64,
    /// Committed approvals.
    pub approvals: u64,
    /// Committed delegated transfers.
    pub delegated_transfers: u64,
    /// Mutations rejected for lack of balance.
    pub rejected_insufficient_balance: u64,
    /// Mutations rejected for lack of allowance.
    pub rejected_insufficient_allowance: u64,
    /// Speculative evaluations, successful or not.
    pub speculative_calls: u64,
}

impl ServiceStats {
    /// Total committed mutations.
    #[must_use]
    pub fn committed(&self) -> u64 {
        self.transfers + self.approvals + self.delegated_transfers
    }

    /// Total rejected mutations.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected_insufficient_balance + self.rejected_insufficient_allowance
    }

    fn record_commit(&mut self, op: &Operation) {
        match op {
            Operation::Transfer { .. } => self.transfers += 1,
            Operation::Approve { .. } => self.approvals += 1,
            Operation::TransferFrom { .. } => self.delegated_transfers += 1,
        }
    }

    fn record_rejection(&mut self, err: &TokenError) {
        match err {
            TokenError::InsufficientBalance { .. } => self.rejected_insufficient_balance += 1,
            TokenError::InsufficientAllowance { .. } => self.rejected_insufficient_allowance += 1,
        }
    }
}

/// Hands out emission turns in sequence order.
struct EmitGate {
    next: Mutex<u64>,
    turn: Condvar,
}

impl EmitGate {
    fn new(next: u64) -> Self {
        Self {
            next: Mutex::new(next),
            turn: Condvar::new(),
        }
    }

    /// Block until `sequence` is due.
    fn wait_for(&self, sequence: u64) -> EmitTurn<'_> {
        let mut next = self.next.lock();
        while *next != sequence {
            self.turn.wait(&mut next);
        }
        EmitTurn {
            next,
            turn: &self.turn,
        }
    }
}

/// The right to emit one record. Dropping it passes the turn on, even if
/// the sink panicked.
struct EmitTurn<'a> {
    next: MutexGuard<'a, u64>,
    turn: &'a Condvar,
}

impl Drop for EmitTurn<'_> {
    fn drop(&mut self) {
        *self.next += 1;
        self.turn.notify_all();
    }
}

struct Inner {
    state: TokenState,
    next_sequence: u64,
    stats: ServiceStats,
}

/// The main Token Service.
///
/// This service:
/// 1. Serializes every mutation behind one lock
/// 2. Numbers committed events without gaps
/// 3. Emits each event to the sink after commit
/// 4. Maintains operation statistics
pub struct TokenService<E: EventSink> {
    config: ServiceConfig,
    inner: Mutex<Inner>,
    emit_gate: EmitGate,
    sink: E,
}

impl<E: EventSink> TokenService<E> {
    /// Create the ledger with the full supply credited to `initial_holder`.
    pub fn new(
        config: ServiceConfig,
        initial_holder: AccountId,
        sink: E,
    ) -> Result<Self, ConfigError> {
        config.token.validate()?;

        let state = TokenState::new(initial_holder, config.token.initial_supply);
        info!(
            name = %config.token.name,
            symbol = %config.token.symbol,
            total_supply = %config.token.initial_supply,
            initial_holder = %initial_holder,
            "Token ledger created"
        );

        Ok(Self::from_state(config, state, 0, sink))
    }

    /// Resume from a snapshot. The snapshot's supply and balances replace
    /// `config.token.initial_supply`.
    pub fn restore(
        config: ServiceConfig,
        snapshot: &LedgerSnapshot,
        sink: E,
    ) -> Result<Self, SnapshotError> {
        let state = snapshot.restore()?;

        if state.total_supply() != config.token.initial_supply {
            warn!(
                configured = %config.token.initial_supply,
                restored = %state.total_supply(),
                "Snapshot supply differs from configuration, using snapshot"
            );
        }
        info!(
            total_supply = %state.total_supply(),
            holders = state.ledger().holder_count(),
            allowances = state.allowances().len(),
            next_sequence = snapshot.next_sequence,
            "Token ledger restored from snapshot"
        );

        Ok(Self::from_state(config, state, snapshot.next_sequence, sink))
    }

    fn from_state(config: ServiceConfig, state: TokenState, next_sequence: u64, sink: E) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state,
                next_sequence,
                stats: ServiceStats::default(),
            }),
            emit_gate: EmitGate::new(next_sequence),
            sink,
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The injected event sink.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.inner.lock().stats.clone()
    }

    /// Sequence number the next committed event will carry.
    pub fn next_sequence(&self) -> u64 {
        self.inner.lock().next_sequence
    }

    /// Run `f` against a consistent view of the state.
    pub fn with_state<R>(&self, f: impl FnOnce(&TokenState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    /// Capture the current state for persistence.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let inner = self.inner.lock();
        LedgerSnapshot::capture(&inner.state, inner.next_sequence)
    }

    fn commit(&self, op: Operation) -> Result<Receipt, TokenError> {
        let mut inner = self.inner.lock();

        let event = match inner.state.apply(&op) {
            Ok(event) => event,
            Err(err) => {
                inner.stats.record_rejection(&err);
                drop(inner);
                warn!(operation = op.kind(), error = %err, "Operation rejected");
                #[cfg(feature = "metrics")]
                tic_telemetry::metrics::record_rejection(err.reason());
                return Err(err);
            }
        };

        let record = EventRecord {
            sequence: inner.next_sequence,
            event,
        };
        inner.next_sequence += 1;
        inner.stats.record_commit(&op);

        if self.config.check_invariants {
            if let InvariantCheckResult::Invalid(violations) = check_all_invariants(&inner.state)
            {
                error!(
                    operation = op.kind(),
                    sequence = record.sequence,
                    violations = ?violations,
                    "Ledger invariant violated after commit"
                );
            }
        }

        drop(inner);

        let turn = self.emit_gate.wait_for(record.sequence);
        self.sink.emit(&record);
        drop(turn);

        debug!(
            operation = op.kind(),
            sequence = record.sequence,
            event = record.event.name(),
            "Operation committed"
        );

        #[cfg(feature = "metrics")]
        record_commit_metric(&op);

        Ok(Receipt { logs: vec![record] })
    }

    fn speculate(&self, op: Operation) -> Result<bool, TokenError> {
        let mut inner = self.inner.lock();
        inner.stats.speculative_calls += 1;
        let outcome = inner.state.simulate(&op);
        drop(inner);

        match outcome {
            Ok(_) => Ok(true),
            Err(err) => {
                debug!(operation = op.kind(), error = %err, "Speculative call would fail");
                Err(err)
            }
        }
    }
}

#[cfg(feature = "metrics")]
fn record_commit_metric(op: &Operation) {
    match op {
        Operation::Approve { .. } => tic_telemetry::metrics::record_approval(),
        Operation::Transfer { .. } | Operation::TransferFrom { .. } => {
            tic_telemetry::metrics::record_transfer();
        }
    }
}

impl<E: EventSink> TokenApi for TokenService<E> {
    fn name(&self) -> &str {
        &self.config.token.name
    }

    fn symbol(&self) -> &str {
        &self.config.token.symbol
    }

    fn standard(&self) -> &str {
        &self.config.token.standard
    }

    fn total_supply(&self) -> Amount {
        self.inner.lock().state.total_supply()
    }

    fn balance_of(&self, account: AccountId) -> Amount {
        self.inner.lock().state.balance_of(&account)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.inner.lock().state.allowance_of(&owner, &spender)
    }

    #[instrument(skip(self), fields(caller = %caller, to = %to, value = %value))]
    fn transfer(
        &self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        self.commit(Operation::Transfer {
            from: caller,
            to,
            value,
        })
    }

    #[instrument(skip(self), fields(caller = %caller, spender = %spender, value = %value))]
    fn approve(
        &self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        self.commit(Operation::Approve {
            owner: caller,
            spender,
            value,
        })
    }

    #[instrument(
        skip(self),
        fields(caller = %caller, owner = %owner, to = %to, value = %value)
    )]
    fn transfer_from(
        &self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<Receipt, TokenError> {
        self.commit(Operation::TransferFrom {
            spender: caller,
            owner,
            to,
            value,
        })
    }

    fn call_transfer(
        &self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError> {
        self.speculate(Operation::Transfer {
            from: caller,
            to,
            value,
        })
    }

    fn call_approve(
        &self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError> {
        self.speculate(Operation::Approve {
            owner: caller,
            spender,
            value,
        })
    }

    fn call_transfer_from(
        &self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<bool, TokenError> {
        self.speculate(Operation::TransferFrom {
            spender: caller,
            owner,
            to,
            value,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
