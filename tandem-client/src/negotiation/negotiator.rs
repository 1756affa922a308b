use crate::negotiation::{Role, SignalingState};
use crate::peer::{PeerBackend, PeerError};
use std::sync::Arc;
use tandem_core::IceCandidate;
use tracing::debug;

/// Perfect-negotiation state machine for one peer session.
///
/// Both sides may decide to renegotiate at the same moment; the role
/// assignment guarantees exactly one offer survives such a collision. The
/// polite side accepts a colliding remote offer (its own in-flight offer is
/// rolled back by applying the remote one); the impolite side discards it
/// and lets its own offer stand.
pub struct Negotiator {
    role: Role,
    backend: Arc<dyn PeerBackend>,
    making_offer: bool,
    signaling_state: SignalingState,
    remote_description_set: bool,
}

impl Negotiator {
    pub fn new(role: Role, backend: Arc<dyn PeerBackend>) -> Self {
        Self {
            role,
            backend,
            making_offer: false,
            signaling_state: SignalingState::Stable,
            remote_description_set: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn signaling_state(&self) -> SignalingState {
        self.signaling_state
    }

    pub fn is_making_offer(&self) -> bool {
        self.making_offer
    }

    /// Local negotiation trigger. Returns the offer to send, or `None` when
    /// the attempt is deferred because an exchange is already in flight (the
    /// trigger fires again once the connection is stable; a second offer is
    /// never queued).
    pub async fn negotiation_needed(&mut self) -> Result<Option<String>, PeerError> {
        if self.making_offer || self.signaling_state != SignalingState::Stable {
            debug!("Negotiation deferred, exchange already in flight");
            return Ok(None);
        }

        self.making_offer = true;
        let result = self.backend.create_offer().await;
        // The flag is released on success and failure alike; a failed offer
        // must not wedge the machine.
        self.making_offer = false;

        match result {
            Ok(sdp) => {
                self.signaling_state = SignalingState::HaveLocalOffer;
                Ok(Some(sdp))
            }
            Err(e) => Err(e),
        }
    }

    /// Remote offer arrived. Returns the answer to send, or `None` when the
    /// offer collided with our own and our role says to discard it.
    pub async fn handle_remote_offer(&mut self, sdp: String) -> Result<Option<String>, PeerError> {
        let collision = self.making_offer || self.signaling_state != SignalingState::Stable;

        let ignore_offer = collision && self.role == Role::Impolite;
        if ignore_offer {
            debug!("Offer collision, discarding the remote offer");
            return Ok(None);
        }

        // On the polite side a collision is resolved here: applying the
        // remote offer rolls back our own pending one.
        self.backend.set_remote_offer(sdp).await?;
        self.signaling_state = SignalingState::HaveRemoteOffer;
        self.remote_description_set = true;

        let answer = self.backend.create_answer().await?;
        self.signaling_state = SignalingState::Stable;
        Ok(Some(answer))
    }

    /// Answer to an offer we originated.
    pub async fn handle_remote_answer(&mut self, sdp: String) -> Result<(), PeerError> {
        self.backend.set_remote_answer(sdp).await?;
        self.signaling_state = SignalingState::Stable;
        self.remote_description_set = true;
        Ok(())
    }

    /// Candidates that arrive before any remote description are dropped, not
    /// buffered; applying them against no description is undefined.
    pub async fn handle_remote_candidate(&mut self, candidate: IceCandidate) -> Result<(), PeerError> {
        if !self.remote_description_set {
            debug!("Dropping candidate that arrived before the remote description");
            return Ok(());
        }
        self.backend.add_ice_candidate(candidate).await
    }
}
