pub mod config;
pub mod lifecycle;
pub mod media;
pub mod negotiation;
pub mod peer;
pub mod transport;

pub use config::RtcConfig;
pub use lifecycle::{CallCommand, CallController, CallEvents, Severity};
pub use media::{LocalMedia, MediaError, MediaSource, StreamHandle};
pub use negotiation::{Negotiator, Role, SignalingState};
pub use peer::{PeerBackend, PeerConnector, PeerError, PeerEvent, RtcBackend};
pub use transport::{SignalDispatcher, SignalTransport, TransportError};
