mod connection;
mod identity;
mod media;
mod room;
mod signal;

pub use connection::ConnId;
pub use identity::Identity;
pub use media::MediaKind;
pub use room::RoomId;
pub use signal::{ClientSignal, IceCandidate, IceServerConfig, ServerSignal};
