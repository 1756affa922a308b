mod peer_backend;
mod rtc_backend;

pub use peer_backend::{PeerBackend, PeerConnector, PeerError, PeerEvent};
pub use rtc_backend::RtcBackend;
