use crate::relay::RelayCommand;
use crate::signaling::SignalSink;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ConnId, ServerSignal};
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    conns: DashMap<ConnId, mpsc::UnboundedSender<Message>>,
}

/// Registry of live WebSocket connections plus the channel into the relay
/// actor. Cheap to clone; ws tasks insert/remove their own entry, the relay
/// writes through the [`SignalSink`] impl.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_cmd_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_cmd_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                conns: DashMap::new(),
            }),
            relay_cmd_tx,
        }
    }

    pub fn add_conn(&self, conn: ConnId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.conns.insert(conn, tx);
    }

    pub fn remove_conn(&self, conn: &ConnId) {
        self.inner.conns.remove(conn);
    }

    pub fn send_signal(&self, conn: ConnId, signal: ServerSignal) {
        if let Some(tx) = self.inner.conns.get(&conn) {
            match serde_json::to_string(&signal) {
                Ok(json) => {
                    if let Err(e) = tx.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", conn, e);
                    }
                }
                Err(e) => error!("Failed to serialize server signal: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected connection {}", conn);
        }
    }
}

#[async_trait]
impl SignalSink for SignalingService {
    async fn send(&self, conn: ConnId, signal: ServerSignal) {
        self.send_signal(conn, signal);
    }

    async fn disconnect(&self, conn: ConnId) {
        // Dropping the sender ends the connection's send task, which tears
        // down the socket.
        self.remove_conn(&conn);
    }
}
