use tandem_core::{Identity, ServerSignal};
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

#[tokio::test]
async fn test_room_full_rejected() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    join(&cmd_tx, "bob", "r1").await;
    let conn_c = join(&cmd_tx, "carol", "r1").await;

    // alice + bob accepts, peer-joined to alice, rejection for carol.
    assert!(sink.wait_for_signals(4, 1000).await, "expected four signals");

    let to_c = sink.signals_to(&conn_c).await;
    assert_eq!(to_c.len(), 1);
    assert!(
        matches!(to_c[0], ServerSignal::RoomFullError { .. }),
        "expected RoomFullError, got {:?}",
        to_c
    );

    // carol never made it into the directory: signals addressed to her are
    // dropped, and the two occupants are untouched.
    cmd_tx
        .send(RelayCommand::Offer {
            conn: conn_a,
            to: Identity::from("carol"),
            sdp: "v=0 offer".to_owned(),
        })
        .await
        .expect("relay should be running");

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(sink.signals_to(&conn_c).await.len(), 1, "no routing to carol");
}
