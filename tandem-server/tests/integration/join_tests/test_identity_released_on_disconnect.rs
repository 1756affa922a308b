use tandem_core::ServerSignal;
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

/// A transport drop without an explicit leave must release the identity, so
/// a later join under the same handle succeeds.
#[tokio::test]
async fn test_identity_released_on_disconnect() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_old = join(&cmd_tx, "alice", "r1").await;
    assert!(sink.wait_for_signals(1, 1000).await);

    cmd_tx
        .send(RelayCommand::Disconnect { conn: conn_old })
        .await
        .expect("relay should be running");

    let conn_new = join(&cmd_tx, "alice", "r2").await;
    assert!(sink.wait_for_signals(2, 1000).await, "expected a second reply");

    let to_new = sink.signals_to(&conn_new).await;
    assert!(
        matches!(to_new[0], ServerSignal::JoinAccepted { .. }),
        "rejoin after disconnect should be accepted, got {:?}",
        to_new
    );
}
