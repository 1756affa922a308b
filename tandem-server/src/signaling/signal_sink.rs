use async_trait::async_trait;
use tandem_core::{ConnId, ServerSignal};

/// Outbound side of the relay: whatever owns the transport connections
/// (the WebSocket service in production, a capturing mock in tests)
/// implements this so the relay can deliver signals and evict connections.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Deliver a signal to one connection.
    async fn send(&self, conn: ConnId, signal: ServerSignal);

    /// Force-close a connection's transport.
    async fn disconnect(&self, conn: ConnId);
}
