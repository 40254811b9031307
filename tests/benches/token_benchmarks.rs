//! # TicToken Ledger Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | `TokenState::apply` | Validation plus map updates, no locking |
//! | `TokenService::transfer` | Full commit path with sink delivery |
//! | `TokenService::call_transfer` | Speculative evaluation |
//! | `LedgerSnapshot` | Capture and JSON encode at several ledger sizes |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tic_token::prelude::*;

const SUPPLY: u64 = 1_000_000_000;

fn account(i: u8) -> AccountId {
    AccountId::from_index(i)
}

fn service<E: EventSink>(sink: E) -> TokenService<E> {
    let config = ServiceConfig {
        token: TokenConfig::default().with_initial_supply(SUPPLY),
        check_invariants: false,
    };
    TokenService::new(config, account(0), sink).expect("valid config")
}

// ============================================================================
// Domain: apply without the service lock
// ============================================================================

fn bench_state_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("tic-token-domain");

    group.bench_function("transfer_apply", |b| {
        let mut state = TokenState::new(account(0), Amount::from(SUPPLY));
        let op = Operation::Transfer {
            from: account(0),
            to: account(1),
            value: Amount::one(),
        };
        b.iter(|| black_box(state.apply(&op).is_ok()));
    });

    group.bench_function("transfer_from_apply", |b| {
        let mut state = TokenState::new(account(0), Amount::from(SUPPLY));
        state
            .approve(account(0), account(1), Amount::from(SUPPLY))
            .expect("approve never fails");
        let op = Operation::TransferFrom {
            spender: account(1),
            owner: account(0),
            to: account(2),
            value: Amount::one(),
        };
        b.iter(|| black_box(state.apply(&op).is_ok()));
    });

    group.bench_function("rejected_simulate", |b| {
        let state = TokenState::new(account(0), Amount::from(SUPPLY));
        let op = Operation::Transfer {
            from: account(1),
            to: account(2),
            value: Amount::one(),
        };
        b.iter(|| black_box(state.simulate(&op).is_err()));
    });

    group.finish();
}

// ============================================================================
// Service: full commit path
// ============================================================================

fn bench_service(c: &mut Criterion) {
    let mut group = c.benchmark_group("tic-token-service");

    group.bench_function("transfer_null_sink", |b| {
        let token = service(NullEventSink);
        b.iter(|| black_box(token.transfer(account(0), account(1), Amount::one())));
    });

    group.bench_function("transfer_broadcast_sink", |b| {
        let bus = Arc::new(BroadcastEventSink::new());
        let _subscription = bus.subscribe(EventFilter::All);
        let token = service(Arc::clone(&bus));
        b.iter(|| black_box(token.transfer(account(0), account(1), Amount::one())));
    });

    group.bench_function("call_transfer", |b| {
        let token = service(NullEventSink);
        b.iter(|| black_box(token.call_transfer(account(0), account(1), Amount::one())));
    });

    group.bench_function("balance_of", |b| {
        let token = service(NullEventSink);
        b.iter(|| black_box(token.balance_of(account(0))));
    });

    group.finish();
}

// ============================================================================
// Snapshots at several ledger sizes
// ============================================================================

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("tic-token-snapshot");

    for holders in [10usize, 100, 1_000] {
        let mut rng = StdRng::seed_from_u64(holders as u64);
        let mut state = TokenState::new(account(0), Amount::from(SUPPLY));
        for _ in 0..holders {
            let mut bytes = [0u8; 20];
            rng.fill(&mut bytes);
            state
                .transfer(account(0), AccountId::new(bytes), Amount::from(10))
                .expect("supply covers all holders");
        }

        group.throughput(Throughput::Elements(holders as u64));
        group.bench_with_input(
            BenchmarkId::new("capture_to_json", holders),
            &state,
            |b, state| {
                b.iter(|| {
                    let snapshot = LedgerSnapshot::capture(state, 0);
                    black_box(snapshot.to_json().expect("encodes"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_state_apply, bench_service, bench_snapshot);
criterion_main!(benches);
