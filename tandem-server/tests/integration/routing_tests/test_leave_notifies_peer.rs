use tandem_core::{Identity, RoomId, ServerSignal};
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

#[tokio::test]
async fn test_leave_notifies_peer() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    let conn_b = join(&cmd_tx, "bob", "r1").await;
    assert!(sink.wait_for_signals(3, 1000).await);

    cmd_tx
        .send(RelayCommand::Leave {
            conn: conn_a,
            room_id: RoomId::from("r1"),
            identity: Identity::from("alice"),
        })
        .await
        .expect("relay should be running");
    assert!(sink.wait_for_signals(4, 1000).await);

    let to_b = sink.signals_to(&conn_b).await;
    match to_b.last().expect("bob should have signals") {
        ServerSignal::LeaveNotice { room_id, identity } => {
            assert_eq!(room_id.0, "r1");
            assert_eq!(identity.0, "alice");
        }
        other => panic!("expected LeaveNotice, got {:?}", other),
    }

    // The leaver's transport is force-closed and its room slot is free again.
    assert_eq!(sink.disconnects().await, vec![conn_a]);

    let conn_c = join(&cmd_tx, "carol", "r1").await;
    assert!(sink.wait_for_signals(6, 1000).await);
    assert!(
        matches!(
            sink.signals_to(&conn_c).await[0],
            ServerSignal::JoinAccepted { .. }
        ),
        "vacated slot should admit a new occupant"
    );

    // A second leave for the same identity is a no-op.
    cmd_tx
        .send(RelayCommand::Leave {
            conn: conn_a,
            room_id: RoomId::from("r1"),
            identity: Identity::from("alice"),
        })
        .await
        .expect("relay should be running");
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(sink.disconnects().await.len(), 1);
}
