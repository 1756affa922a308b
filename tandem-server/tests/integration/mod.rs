pub mod join_tests;
pub mod routing_tests;

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use tandem_core::{ConnId, Identity, RoomId};
use tandem_server::{Relay, RelayCommand};

use crate::utils::MockSignalSink;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_relay() -> (mpsc::Sender<RelayCommand>, MockSignalSink) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<RelayCommand>(100);
    let sink = MockSignalSink::new();

    let relay = Relay::new(cmd_rx, Arc::new(sink.clone()));
    tokio::spawn(relay.run());

    (cmd_tx, sink)
}

/// Simulate a fresh connection requesting a room slot.
pub async fn join(cmd_tx: &mpsc::Sender<RelayCommand>, identity: &str, room: &str) -> ConnId {
    let conn = ConnId::new();
    cmd_tx
        .send(RelayCommand::Join {
            conn,
            identity: Identity::from(identity),
            room_id: RoomId::from(room),
        })
        .await
        .expect("relay should be running");
    conn
}
