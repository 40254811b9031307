//! # Snapshots and Metrics
//!
//! A host persists the ledger as a JSON snapshot and resumes from it later.
//! Prometheus counters track commits and rejections.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::fixtures::{account, amount, checked_config, deploy};
    use tic_token::prelude::*;

    #[test]
    fn test_resume_from_persisted_snapshot() {
        let d = deploy();
        d.token
            .transfer(account(0), account(2), amount(100))
            .unwrap();
        d.token.approve(account(2), account(4), amount(10)).unwrap();
        d.token
            .transfer_from(account(4), account(2), account(3), amount(4))
            .unwrap();

        let bytes = d.token.snapshot().to_json().unwrap();
        let snapshot = LedgerSnapshot::from_json(&bytes).unwrap();

        let log = Arc::new(InMemoryEventLog::new());
        let resumed = TokenService::restore(checked_config(), &snapshot, Arc::clone(&log)).unwrap();
        assert_eq!(resumed.balance_of(account(2)), amount(96));
        assert_eq!(resumed.balance_of(account(3)), amount(4));
        assert_eq!(resumed.allowance(account(2), account(4)), amount(6));
        assert_eq!(resumed.total_supply(), amount(1_000_000));

        let receipt = resumed
            .transfer_from(account(4), account(2), account(3), amount(6))
            .unwrap();
        assert_eq!(receipt.logs[0].sequence, 3);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_tampered_snapshot_is_refused() {
        let d = deploy();
        d.token
            .transfer(account(0), account(1), amount(500))
            .unwrap();

        let mut snapshot = d.token.snapshot();
        for entry in &mut snapshot.balances {
            if entry.account == account(1) {
                entry.balance = amount(5_000);
            }
        }

        let result = TokenService::restore(checked_config(), &snapshot, NullEventSink);
        assert!(matches!(result, Err(SnapshotError::InvariantViolated(_))));
    }

    #[test]
    fn test_snapshot_json_lists_only_nonzero_entries() {
        let d = deploy();
        d.token
            .transfer(account(0), account(1), amount(1_000_000))
            .unwrap();
        d.token.approve(account(1), account(2), amount(5)).unwrap();
        d.token.approve(account(1), account(2), Amount::zero()).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&d.token.snapshot().to_json().unwrap()).unwrap();
        assert_eq!(json["balances"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["allowances"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["next_sequence"], 3);
    }

    #[test]
    fn test_metrics_count_commits_and_rejections() {
        tic_telemetry::register_metrics().unwrap();
        let transfers_before = tic_telemetry::TRANSFERS_TOTAL.get();
        let rejections_before = tic_telemetry::REJECTIONS_TOTAL
            .with_label_values(&["insufficient_allowance"])
            .get();

        let d = deploy();
        d.token
            .transfer(account(0), account(1), amount(1))
            .unwrap();
        let _ = d
            .token
            .transfer_from(account(2), account(1), account(3), amount(1));

        assert!(tic_telemetry::TRANSFERS_TOTAL.get() >= transfers_before + 1.0);
        assert!(
            tic_telemetry::REJECTIONS_TOTAL
                .with_label_values(&["insufficient_allowance"])
                .get()
                >= rejections_before + 1.0
        );

        let text = tic_telemetry::encode_metrics().unwrap();
        assert!(text.contains("tic_token_transfers_total"));
        assert!(text.contains("tic_token_rejections_total"));
    }
}
