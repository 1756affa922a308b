use crate::media::StreamHandle;
use async_trait::async_trait;
use tandem_core::{Identity, MediaKind, RoomId};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Severity {
    Info,
    Error,
}

/// Requests arriving from the UI collaborator.
#[derive(Debug)]
pub enum CallCommand {
    Join { identity: Identity, room_id: RoomId },
    HangUp,
    Toggle { kind: MediaKind, enabled: bool },
}

/// What the controller tells the UI collaborator. Implementations render;
/// the core never does.
#[async_trait]
pub trait CallEvents: Send + Sync {
    async fn joined(&self, identity: Identity, room_id: RoomId);

    async fn peer_identity(&self, identity: Option<Identity>);

    async fn local_stream(&self, stream: Option<StreamHandle>);

    async fn remote_stream(&self, stream: Option<StreamHandle>);

    /// The remote side muted or unmuted one of its tracks.
    async fn peer_media_toggled(&self, kind: MediaKind, enabled: bool);

    async fn notification(&self, message: String, severity: Severity);
}
