use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::MediaKind;
use thiserror::Error;

/// Opaque reference to a media stream, passed to the UI collaborator for
/// rendering. The core never looks inside.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StreamHandle(pub String);

#[derive(Debug, Error)]
#[error("media unavailable: {message}")]
pub struct MediaError {
    pub message: String,
}

impl MediaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The local capture stream, owned by the lifecycle controller for the
/// duration of one session. Toggling a track is a local mutation with no
/// concurrent writers.
pub trait LocalMedia: Send + Sync {
    fn handle(&self) -> StreamHandle;

    /// Flip one track's enabled flag.
    fn set_enabled(&self, kind: MediaKind, enabled: bool);

    /// Stop all tracks. Called once, on hang-up.
    fn stop(&self);
}

/// Capability to acquire the local capture devices (camera + microphone).
/// Acquisition failure is fatal to the session: without local media there is
/// no call, so the failure is surfaced and never retried automatically.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<Arc<dyn LocalMedia>, MediaError>;
}
