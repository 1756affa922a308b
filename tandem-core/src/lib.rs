pub mod model;

pub use model::{
    ClientSignal, ConnId, IceCandidate, IceServerConfig, Identity, MediaKind, RoomId, ServerSignal,
};
