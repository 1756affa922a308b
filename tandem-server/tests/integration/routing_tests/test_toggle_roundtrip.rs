use tandem_core::{Identity, MediaKind, ServerSignal};
use tandem_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

/// A toggle addressed to one identity lands exactly once on that identity's
/// connection, with the values preserved, and nowhere else.
#[tokio::test]
async fn test_toggle_roundtrip() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay();

    let conn_a = join(&cmd_tx, "alice", "r1").await;
    let conn_b = join(&cmd_tx, "bob", "r1").await;
    let conn_c = join(&cmd_tx, "carol", "r2").await;
    assert!(sink.wait_for_signals(4, 1000).await);

    cmd_tx
        .send(RelayCommand::ToggleMedia {
            conn: conn_a,
            to: Identity::from("bob"),
            kind: MediaKind::Video,
            enabled: false,
        })
        .await
        .expect("relay should be running");
    assert!(sink.wait_for_signals(5, 1000).await);

    let toggles_to_b: Vec<_> = sink
        .signals_to(&conn_b)
        .await
        .into_iter()
        .filter(|s| matches!(s, ServerSignal::ToggleMedia { .. }))
        .collect();
    assert_eq!(toggles_to_b.len(), 1, "exactly one delivery to bob");
    match &toggles_to_b[0] {
        ServerSignal::ToggleMedia { kind, enabled } => {
            assert_eq!(*kind, MediaKind::Video);
            assert!(!enabled);
        }
        _ => unreachable!(),
    }

    for conn in [conn_a, conn_c] {
        assert!(
            !sink
                .signals_to(&conn)
                .await
                .iter()
                .any(|s| matches!(s, ServerSignal::ToggleMedia { .. })),
            "toggle must not leak to other connections"
        );
    }
}
