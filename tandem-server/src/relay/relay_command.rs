use tandem_core::{ConnId, IceCandidate, Identity, MediaKind, RoomId};

/// Commands entering the relay actor from the WebSocket layer. `conn` is
/// always the connection the command arrived on.
#[derive(Debug)]
pub enum RelayCommand {
    /// A client wants to occupy a room slot under an identity.
    Join {
        conn: ConnId,
        identity: Identity,
        room_id: RoomId,
    },

    /// Initial session offer, addressed by identity.
    Offer {
        conn: ConnId,
        to: Identity,
        sdp: String,
    },

    /// Answer to an initial offer, addressed by identity.
    Answer {
        conn: ConnId,
        to: Identity,
        sdp: String,
    },

    /// Renegotiation offer, addressed by identity; forwarded with the
    /// sender's connection handle so the answer can come straight back.
    RenegotiateOffer {
        conn: ConnId,
        to: Identity,
        sdp: String,
    },

    /// Renegotiation answer, addressed directly by connection handle.
    RenegotiateAnswer {
        conn: ConnId,
        to_conn: ConnId,
        sdp: String,
    },

    /// Connectivity candidate for the peer.
    IceCandidate {
        conn: ConnId,
        to: Identity,
        candidate: IceCandidate,
    },

    /// Local track was muted/unmuted; tell the peer.
    ToggleMedia {
        conn: ConnId,
        to: Identity,
        kind: MediaKind,
        enabled: bool,
    },

    /// Explicit departure from a room.
    Leave {
        conn: ConnId,
        room_id: RoomId,
        identity: Identity,
    },

    /// The transport connection dropped.
    Disconnect { conn: ConnId },
}
