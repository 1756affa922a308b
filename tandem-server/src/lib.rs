pub mod config;
pub mod directory;
pub mod relay;
pub mod signaling;

pub use config::ServerConfig;
pub use directory::{Departure, Directory, JoinError, ROOM_CAPACITY};
pub use relay::{Relay, RelayCommand};
pub use signaling::{SignalSink, SignalingService, ws_handler};

use std::sync::Arc;
use tokio::sync::mpsc;

pub struct AppState {
    pub signaling: SignalingService,
}

/// Spawn the relay actor wired to a fresh signaling service and return the
/// state the router needs.
pub fn bootstrap() -> Arc<AppState> {
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    let signaling = SignalingService::new(cmd_tx);

    let relay = Relay::new(cmd_rx, Arc::new(signaling.clone()));
    tokio::spawn(relay.run());

    Arc::new(AppState { signaling })
}
