//! # Event Delivery
//!
//! Committed events reach every configured sink in sequence order, and
//! their serialized form keeps the field names listeners depend on.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use crate::fixtures::{account, amount, deploy, deploy_with_sink};
    use tic_token::prelude::*;

    #[tokio::test]
    async fn test_broadcast_subscribers_see_committed_events() {
        let bus = Arc::new(BroadcastEventSink::new());
        let mut all = bus.subscribe(EventFilter::All);
        let mut approvals = bus.subscribe(EventFilter::Approvals);
        let token = deploy_with_sink(Arc::clone(&bus));

        token.transfer(account(0), account(1), amount(50)).unwrap();
        let _ = token.transfer(account(2), account(1), amount(50));
        token.approve(account(1), account(2), amount(5)).unwrap();

        let first = timeout(Duration::from_secs(1), all.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus open");
        let second = timeout(Duration::from_secs(1), all.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus open");
        assert_eq!((first.sequence, second.sequence), (0, 1));
        assert_eq!(first.event.name(), "Transfer");
        assert_eq!(second.event.name(), "Approval");

        let approval = approvals.try_recv().unwrap().expect("approval delivered");
        assert_eq!(approval.sequence, 1);
        assert_eq!(approvals.try_recv(), Ok(None));

        assert_eq!(bus.events_published(), 2);
    }

    #[tokio::test]
    async fn test_account_filter_follows_delegated_transfer() {
        let bus = Arc::new(BroadcastEventSink::new());
        let mut watch_to = bus.subscribe(EventFilter::Account(account(3)));
        let token = deploy_with_sink(Arc::clone(&bus));

        token.transfer(account(0), account(2), amount(100)).unwrap();
        token.approve(account(2), account(4), amount(10)).unwrap();
        token
            .transfer_from(account(4), account(2), account(3), amount(10))
            .unwrap();

        let record = timeout(Duration::from_secs(1), watch_to.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus open");
        assert_eq!(record.sequence, 2);
        assert_eq!(
            record.event,
            TokenEvent::Transfer {
                from: account(2),
                to: account(3),
                value: amount(10),
            }
        );
    }

    #[test]
    fn test_fan_out_delivers_same_records() {
        let log = Arc::new(InMemoryEventLog::new());
        let bus = Arc::new(BroadcastEventSink::new());
        let fan = FanOutSink::new().with(log.clone()).with(bus.clone());
        let token = deploy_with_sink(fan);

        token.transfer(account(0), account(1), amount(1)).unwrap();
        token.approve(account(0), account(1), amount(1)).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(bus.events_published(), 2);
    }

    #[test]
    fn test_transfer_record_wire_format() {
        let d = deploy();
        d.token
            .transfer(account(0), account(1), amount(250_000))
            .unwrap();

        let json = serde_json::to_value(&d.events()[0]).unwrap();
        assert_eq!(json["sequence"], 0);
        assert_eq!(json["event"], "Transfer");
        assert_eq!(json["from"], account(0).to_hex());
        assert_eq!(json["to"], account(1).to_hex());
        assert!(json.get("value").is_some());
    }

    #[test]
    fn test_approval_record_wire_format() {
        let d = deploy();
        d.token.approve(account(0), account(1), amount(100)).unwrap();

        let text = serde_json::to_string(&d.events()[0]).unwrap();
        let owner_at = text.find("\"owner\"").unwrap();
        let spender_at = text.find("\"spender\"").unwrap();
        let value_at = text.find("\"value\"").unwrap();
        assert!(owner_at < spender_at && spender_at < value_at);
        assert!(text.contains("\"event\":\"Approval\""));
    }
}
