use tandem_core::ServerSignal;

use crate::integration::{create_test_relay, init_tracing, join};

#[tokio::test]
async fn test_duplicate_identity_rejected() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    join(&cmd_tx, "alice", "r1").await;
    let conn_dup = join(&cmd_tx, "alice", "r2").await;

    assert!(sink.wait_for_signals(2, 1000).await, "expected two signals");

    let to_dup = sink.signals_to(&conn_dup).await;
    assert_eq!(to_dup.len(), 1);
    assert!(
        matches!(to_dup[0], ServerSignal::InUseError { .. }),
        "expected InUseError, got {:?}",
        to_dup
    );
}
