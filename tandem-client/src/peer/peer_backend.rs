use crate::config::RtcConfig;
use crate::media::{LocalMedia, StreamHandle};
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::IceCandidate;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
#[error("peer backend: {message}")]
pub struct PeerError {
    pub message: String,
}

impl PeerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Events the peer-media subsystem pushes up to the lifecycle controller.
#[derive(Debug)]
pub enum PeerEvent {
    /// The connection wants a (re)negotiation pass, e.g. tracks changed.
    NegotiationNeeded,
    /// A local connectivity candidate to forward to the peer.
    IceCandidate(IceCandidate),
    /// Remote media arrived.
    RemoteStream(StreamHandle),
    /// The connection reached a terminal state.
    Disconnected,
}

/// The session-description half of the peer-media subsystem, treated as an
/// opaque set of capability calls the core invokes but does not implement.
///
/// `create_offer`/`create_answer` also install the produced description
/// locally. `set_remote_offer` must succeed even while a local offer is
/// pending — applying the remote offer rolls the local one back; that is
/// what lets the polite side yield during glare.
#[async_trait]
pub trait PeerBackend: Send + Sync {
    async fn create_offer(&self) -> Result<String, PeerError>;

    async fn create_answer(&self) -> Result<String, PeerError>;

    async fn set_remote_offer(&self, sdp: String) -> Result<(), PeerError>;

    async fn set_remote_answer(&self, sdp: String) -> Result<(), PeerError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError>;

    async fn close(&self) -> Result<(), PeerError>;
}

/// Builds one fresh [`PeerBackend`] per call session — never a shared
/// singleton, so no state leaks across successive calls. The implementor
/// attaches the local media's tracks at construction time and pumps the
/// connection's events into `events`.
#[async_trait]
pub trait PeerConnector: Send + Sync {
    async fn connect(
        &self,
        config: &RtcConfig,
        media: &dyn LocalMedia,
        events: mpsc::Sender<PeerEvent>,
    ) -> Result<Arc<dyn PeerBackend>, PeerError>;
}
