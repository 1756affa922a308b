mod dispatcher;

pub use dispatcher::SignalDispatcher;

use async_trait::async_trait;
use tandem_core::ClientSignal;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("signal transport: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound half of the client's relay connection. The embedder owns the
/// actual socket; the core only pushes signals through it.
#[async_trait]
pub trait SignalTransport: Send + Sync {
    async fn send(&self, signal: ClientSignal) -> Result<(), TransportError>;
}
