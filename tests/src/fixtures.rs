//! Shared fixtures: account naming and a deployed ledger.

use std::sync::Arc;

use tic_token::prelude::*;

/// Initial supply used by the deployment suite.
pub const INITIAL_SUPPLY: u64 = 1_000_000;

/// The `index`-th test account. Account 0 is the deployer.
pub fn account(index: u8) -> AccountId {
    AccountId::from_index(index)
}

/// Shorthand for an amount.
pub fn amount(value: u64) -> Amount {
    Amount::from(value)
}

/// A freshly deployed ledger plus the log its events land in.
pub struct Deployment {
    pub token: TokenService<Arc<InMemoryEventLog>>,
    pub log: Arc<InMemoryEventLog>,
}

impl Deployment {
    /// Records emitted so far.
    pub fn events(&self) -> Vec<EventRecord> {
        self.log.records()
    }
}

/// Service configuration with invariant checks forced on.
pub fn checked_config() -> ServiceConfig {
    ServiceConfig {
        token: TokenConfig::default().with_initial_supply(INITIAL_SUPPLY),
        check_invariants: true,
    }
}

/// Deploy the default token with the full supply on account 0.
pub fn deploy() -> Deployment {
    tic_telemetry::init_test_tracing();

    let log = Arc::new(InMemoryEventLog::new());
    let token = TokenService::new(checked_config(), account(0), Arc::clone(&log))
        .expect("default configuration is valid");
    Deployment { token, log }
}

/// Deploy the default token emitting into `sink`.
pub fn deploy_with_sink<E: EventSink>(sink: E) -> TokenService<E> {
    tic_telemetry::init_test_tracing();

    TokenService::new(checked_config(), account(0), sink).expect("default configuration is valid")
}
