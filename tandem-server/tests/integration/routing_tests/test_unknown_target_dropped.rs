use tandem_core::{IceCandidate, Identity, ServerSignal};
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

/// Signals to identities that are gone (or never existed) vanish silently;
/// the sender gets no error back.
#[tokio::test]
async fn test_unknown_target_dropped() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    assert!(sink.wait_for_signals(1, 1000).await);

    cmd_tx
        .send(RelayCommand::Offer {
            conn: conn_a,
            to: Identity::from("nobody"),
            sdp: "v=0 offer".to_owned(),
        })
        .await
        .expect("relay should be running");
    cmd_tx
        .send(RelayCommand::IceCandidate {
            conn: conn_a,
            to: Identity::from("nobody"),
            candidate: IceCandidate {
                candidate: "candidate:1 1 udp 1 127.0.0.1 1000 typ host".to_owned(),
                sdp_mid: Some("0".to_owned()),
                sdp_m_line_index: Some(0),
            },
        })
        .await
        .expect("relay should be running");

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let all = sink.all_signals().await;
    assert_eq!(all.len(), 1, "only the JoinAccepted should exist: {:?}", all);
    assert!(matches!(all[0].1, ServerSignal::JoinAccepted { .. }));
}
