/// Mirror of the underlying connection's signaling phase, updated at every
/// transition the negotiator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
}
