use tandem_core::ServerSignal;

use crate::integration::{create_test_relay, init_tracing, join};

#[tokio::test]
async fn test_second_peer_notifies_incumbent() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    let conn_b = join(&cmd_tx, "bob", "r1").await;

    assert!(sink.wait_for_signals(3, 1000).await, "expected three signals");

    // The joiner learns the incumbent's identity from its acknowledgment.
    let to_b = sink.signals_to(&conn_b).await;
    assert_eq!(to_b.len(), 1, "joiner must not receive its own PeerJoined");
    match &to_b[0] {
        ServerSignal::JoinAccepted { peer, .. } => {
            assert_eq!(peer.as_ref().map(|p| p.0.as_str()), Some("alice"));
        }
        other => panic!("expected JoinAccepted, got {:?}", other),
    }

    // The incumbent is told exactly who arrived.
    let to_a = sink.signals_to(&conn_a).await;
    assert!(
        to_a.iter()
            .any(|s| matches!(s, ServerSignal::PeerJoined { identity } if identity.0 == "bob")),
        "incumbent should receive PeerJoined for bob, got {:?}",
        to_a
    );
}
