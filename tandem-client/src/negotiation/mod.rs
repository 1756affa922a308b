mod negotiator;
mod role;
mod signaling_state;

pub use negotiator::Negotiator;
pub use role::Role;
pub use signaling_state::SignalingState;
