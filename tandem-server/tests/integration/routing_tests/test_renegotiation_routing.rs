use tandem_core::{Identity, ServerSignal};
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

/// Renegotiation offers travel by identity but carry the sender's connection
/// handle, so the answer can be addressed straight back to that connection.
#[tokio::test]
async fn test_renegotiation_routing() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    let conn_b = join(&cmd_tx, "bob", "r1").await;
    assert!(sink.wait_for_signals(3, 1000).await);

    cmd_tx
        .send(RelayCommand::RenegotiateOffer {
            conn: conn_a,
            to: Identity::from("bob"),
            sdp: "v=0 renegotiate".to_owned(),
        })
        .await
        .expect("relay should be running");
    assert!(sink.wait_for_signals(4, 1000).await);

    let to_b = sink.signals_to(&conn_b).await;
    let from_conn = match to_b.last().expect("bob should have signals") {
        ServerSignal::RenegotiateOffer { from_conn, sdp } => {
            assert_eq!(sdp, "v=0 renegotiate");
            *from_conn
        }
        other => panic!("expected RenegotiateOffer, got {:?}", other),
    };
    assert_eq!(from_conn, conn_a);

    cmd_tx
        .send(RelayCommand::RenegotiateAnswer {
            conn: conn_b,
            to_conn: from_conn,
            sdp: "v=0 renegotiate-answer".to_owned(),
        })
        .await
        .expect("relay should be running");
    assert!(sink.wait_for_signals(5, 1000).await);

    let to_a = sink.signals_to(&conn_a).await;
    match to_a.last().expect("alice should have signals") {
        ServerSignal::RenegotiateAnswer { from_conn, sdp } => {
            assert_eq!(*from_conn, conn_b);
            assert_eq!(sdp, "v=0 renegotiate-answer");
        }
        other => panic!("expected RenegotiateAnswer, got {:?}", other),
    }
}
