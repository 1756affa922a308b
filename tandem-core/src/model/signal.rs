use crate::model::connection::ConnId;
use crate::model::identity::Identity;
use crate::model::media::MediaKind;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// One connectivity-path descriptor, forwarded verbatim between peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceCandidate {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u16>,
}

/// Messages a client sends to the relay. Payloads are opaque to the server;
/// it only resolves the destination and re-wraps them as [`ServerSignal`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ClientSignal {
    JoinRequest {
        identity: Identity,
        room_id: RoomId,
    },
    Offer {
        to: Identity,
        sdp: String,
    },
    Answer {
        to: Identity,
        sdp: String,
    },
    RenegotiateOffer {
        to: Identity,
        sdp: String,
    },
    RenegotiateAnswer {
        to_conn: ConnId,
        sdp: String,
    },
    IceCandidate {
        to: Identity,
        candidate: IceCandidate,
    },
    ToggleMedia {
        to: Identity,
        kind: MediaKind,
        enabled: bool,
    },
    Leave {
        room_id: RoomId,
        identity: Identity,
    },
}

/// Messages the relay delivers to a client.
///
/// `JoinAccepted.peer` names the room's incumbent when one exists, so the
/// joining side knows whom to address its initial offer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d")]
pub enum ServerSignal {
    JoinAccepted {
        identity: Identity,
        room_id: RoomId,
        peer: Option<Identity>,
    },
    PeerJoined {
        identity: Identity,
    },
    IncomingOffer {
        from: Identity,
        sdp: String,
    },
    IncomingAnswer {
        from: Identity,
        sdp: String,
    },
    RenegotiateOffer {
        from_conn: ConnId,
        sdp: String,
    },
    RenegotiateAnswer {
        from_conn: ConnId,
        sdp: String,
    },
    IceCandidate {
        candidate: IceCandidate,
    },
    ToggleMedia {
        kind: MediaKind,
        enabled: bool,
    },
    LeaveNotice {
        room_id: RoomId,
        identity: Identity,
    },
    InUseError {
        message: String,
    },
    RoomFullError {
        message: String,
    },
}
