use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{ConnId, ServerSignal};
use tandem_server::SignalSink;
use tokio::sync::Mutex;

/// Mock SignalSink that captures every outgoing signal and disconnect.
#[derive(Clone)]
pub struct MockSignalSink {
    signals: Arc<Mutex<Vec<(ConnId, ServerSignal)>>>,
    disconnects: Arc<Mutex<Vec<ConnId>>>,
}

impl MockSignalSink {
    pub fn new() -> Self {
        Self {
            signals: Arc::new(Mutex::new(Vec::new())),
            disconnects: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All signals delivered so far, in order.
    pub async fn all_signals(&self) -> Vec<(ConnId, ServerSignal)> {
        self.signals.lock().await.clone()
    }

    /// Signals delivered to one specific connection.
    pub async fn signals_to(&self, conn: &ConnId) -> Vec<ServerSignal> {
        self.signals
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == conn)
            .map(|(_, signal)| signal.clone())
            .collect()
    }

    /// Connections the relay asked to force-close.
    pub async fn disconnects(&self) -> Vec<ConnId> {
        self.disconnects.lock().await.clone()
    }

    /// Wait until at least `count` signals were delivered in total.
    pub async fn wait_for_signals(&self, count: usize, timeout_ms: u64) -> bool {
        let start = std::time::Instant::now();
        let timeout = std::time::Duration::from_millis(timeout_ms);

        loop {
            if self.signals.lock().await.len() >= count {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

impl Default for MockSignalSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSink for MockSignalSink {
    async fn send(&self, conn: ConnId, signal: ServerSignal) {
        tracing::debug!("[MockSink] send to {}: {:?}", conn, signal);
        self.signals.lock().await.push((conn, signal));
    }

    async fn disconnect(&self, conn: ConnId) {
        tracing::debug!("[MockSink] disconnect {}", conn);
        self.disconnects.lock().await.push(conn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sink_captures_per_connection() {
        let sink = MockSignalSink::new();
        let conn = ConnId::new();

        sink.send(
            conn,
            ServerSignal::PeerJoined {
                identity: "alice".into(),
            },
        )
        .await;

        assert_eq!(sink.signals_to(&conn).await.len(), 1);
        assert!(sink.signals_to(&ConnId::new()).await.is_empty());
    }
}
