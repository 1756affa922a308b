use crate::config::RtcConfig;
use crate::lifecycle::events::{CallCommand, CallEvents, Severity};
use crate::media::{LocalMedia, MediaSource};
use crate::negotiation::{Negotiator, Role};
use crate::peer::{PeerBackend, PeerConnector, PeerEvent};
use crate::transport::SignalTransport;
use std::sync::Arc;
use tandem_core::{ClientSignal, ConnId, IceCandidate, Identity, MediaKind, RoomId, ServerSignal};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// One active call attempt: everything between a join request and the
/// matching teardown. The peer connection and negotiator live here and
/// nowhere else, so nothing leaks into the next call.
struct Session {
    identity: Identity,
    room_id: RoomId,
    backend: Arc<dyn PeerBackend>,
    local_media: Arc<dyn LocalMedia>,
    negotiator: Option<Negotiator>,
    remote_identity: Option<Identity>,
}

enum Input {
    Command(Option<CallCommand>),
    Signal(Option<ServerSignal>),
    Peer(Option<PeerEvent>),
}

/// Drives join → negotiate → media-active → teardown for one client.
///
/// Runs as a single task selecting over UI commands, inbound server signals
/// and peer-connection events, so negotiation state is never touched
/// concurrently — an incoming remote offer and an in-flight local offer can
/// only meet inside the negotiator's collision check.
pub struct CallController {
    transport: Arc<dyn SignalTransport>,
    connector: Arc<dyn PeerConnector>,
    media: Arc<dyn MediaSource>,
    events: Arc<dyn CallEvents>,
    config: RtcConfig,
    command_rx: mpsc::Receiver<CallCommand>,
    signal_rx: mpsc::UnboundedReceiver<ServerSignal>,
    peer_rx: Option<mpsc::Receiver<PeerEvent>>,
    session: Option<Session>,
}

impl CallController {
    pub fn new(
        transport: Arc<dyn SignalTransport>,
        connector: Arc<dyn PeerConnector>,
        media: Arc<dyn MediaSource>,
        events: Arc<dyn CallEvents>,
        config: RtcConfig,
        command_rx: mpsc::Receiver<CallCommand>,
        signal_rx: mpsc::UnboundedReceiver<ServerSignal>,
    ) -> Self {
        Self {
            transport,
            connector,
            media,
            events,
            config,
            command_rx,
            signal_rx,
            peer_rx: None,
            session: None,
        }
    }

    pub async fn run(mut self) {
        info!("Call controller started");

        loop {
            let input = {
                let peer_rx = self.peer_rx.as_mut();
                let peer_event = async move {
                    match peer_rx {
                        Some(rx) => rx.recv().await,
                        None => std::future::pending().await,
                    }
                };

                tokio::select! {
                    cmd = self.command_rx.recv() => Input::Command(cmd),
                    signal = self.signal_rx.recv() => Input::Signal(signal),
                    event = peer_event => Input::Peer(event),
                }
            };

            match input {
                Input::Command(Some(cmd)) => self.handle_command(cmd).await,
                Input::Signal(Some(signal)) => self.handle_signal(signal).await,
                Input::Peer(Some(event)) => self.handle_peer_event(event).await,
                Input::Command(None) | Input::Signal(None) => break,
                Input::Peer(None) => {
                    // Backend event channel closed with the session; nothing
                    // left to watch until the next join.
                    self.peer_rx = None;
                }
            }
        }

        info!("Call controller finished");
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::Join { identity, room_id } => self.handle_join(identity, room_id).await,
            CallCommand::HangUp => self.handle_hang_up().await,
            CallCommand::Toggle { kind, enabled } => self.handle_toggle(kind, enabled).await,
        }
    }

    async fn handle_join(&mut self, identity: Identity, room_id: RoomId) {
        if self.session.is_some() {
            warn!("Join requested while a session is active, ignoring");
            return;
        }

        let local_media = match self.media.acquire().await {
            Ok(media) => media,
            Err(e) => {
                error!("Local media unavailable: {}", e);
                self.events
                    .notification(
                        format!("Could not access camera/microphone: {e}"),
                        Severity::Error,
                    )
                    .await;
                return;
            }
        };

        let (peer_tx, peer_rx) = mpsc::channel(256);
        let backend = match self
            .connector
            .connect(&self.config, local_media.as_ref(), peer_tx)
            .await
        {
            Ok(backend) => backend,
            Err(e) => {
                error!("Failed to set up peer connection: {}", e);
                local_media.stop();
                self.events
                    .notification("Could not set up the call".to_owned(), Severity::Error)
                    .await;
                return;
            }
        };

        self.events
            .local_stream(Some(local_media.handle()))
            .await;

        if let Err(e) = self
            .transport
            .send(ClientSignal::JoinRequest {
                identity: identity.clone(),
                room_id: room_id.clone(),
            })
            .await
        {
            error!("Failed to send join request: {}", e);
            local_media.stop();
            if let Err(e) = backend.close().await {
                warn!("Error closing peer connection: {}", e);
            }
            self.events.local_stream(None).await;
            self.events
                .notification("Lost connection to the relay".to_owned(), Severity::Error)
                .await;
            return;
        }

        self.peer_rx = Some(peer_rx);
        self.session = Some(Session {
            identity,
            room_id,
            backend,
            local_media,
            negotiator: None,
            remote_identity: None,
        });
    }

    async fn handle_hang_up(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.peer_rx = None;

        info!("{} hanging up", session.identity);

        session.local_media.stop();
        if let Err(e) = session.backend.close().await {
            warn!("Error closing peer connection: {}", e);
        }

        if let Err(e) = self
            .transport
            .send(ClientSignal::Leave {
                room_id: session.room_id,
                identity: session.identity,
            })
            .await
        {
            warn!("Failed to send leave: {}", e);
        }

        self.events.local_stream(None).await;
        self.events.remote_stream(None).await;
        self.events.peer_identity(None).await;
    }

    async fn handle_toggle(&mut self, kind: MediaKind, enabled: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        session.local_media.set_enabled(kind, enabled);

        if let Some(remote) = session.remote_identity.clone() {
            if let Err(e) = self
                .transport
                .send(ClientSignal::ToggleMedia {
                    to: remote,
                    kind,
                    enabled,
                })
                .await
            {
                warn!("Failed to send toggle: {}", e);
            }
        }
    }

    async fn handle_signal(&mut self, signal: ServerSignal) {
        match signal {
            ServerSignal::JoinAccepted {
                identity,
                room_id,
                peer,
            } => self.handle_join_accepted(identity, room_id, peer).await,

            ServerSignal::PeerJoined { identity } => self.handle_peer_joined(identity).await,

            ServerSignal::IncomingOffer { from, sdp } => {
                self.handle_incoming_offer(from, sdp).await
            }

            ServerSignal::IncomingAnswer { from: _, sdp }
            | ServerSignal::RenegotiateAnswer { from_conn: _, sdp } => {
                self.apply_remote_answer(sdp).await
            }

            ServerSignal::RenegotiateOffer { from_conn, sdp } => {
                self.handle_renegotiate_offer(from_conn, sdp).await
            }

            ServerSignal::IceCandidate { candidate } => {
                self.handle_remote_candidate(candidate).await
            }

            ServerSignal::ToggleMedia { kind, enabled } => {
                self.events.peer_media_toggled(kind, enabled).await
            }

            ServerSignal::LeaveNotice { identity, .. } => self.handle_leave_notice(identity).await,

            ServerSignal::InUseError { message } | ServerSignal::RoomFullError { message } => {
                self.handle_join_rejected(message).await
            }
        }
    }

    async fn handle_join_accepted(
        &mut self,
        identity: Identity,
        room_id: RoomId,
        peer: Option<Identity>,
    ) {
        let Some(session) = self.session.as_mut() else {
            warn!("JoinAccepted without a pending session");
            return;
        };

        info!("{} joined room {}", identity, room_id);
        self.events.joined(identity, room_id).await;

        // An occupied room makes us the second peer: impolite, and the
        // initial offer is ours to send.
        if let Some(peer) = peer {
            let mut negotiator = Negotiator::new(Role::Impolite, session.backend.clone());
            session.remote_identity = Some(peer.clone());

            match negotiator.negotiation_needed().await {
                Ok(Some(sdp)) => {
                    if let Err(e) = self
                        .transport
                        .send(ClientSignal::Offer {
                            to: peer.clone(),
                            sdp,
                        })
                        .await
                    {
                        warn!("Failed to send initial offer: {}", e);
                    }
                }
                Ok(None) => {}
                Err(e) => error!("Failed to produce initial offer: {}", e),
            }

            session.negotiator = Some(negotiator);
            self.events.peer_identity(Some(peer)).await;
        }
    }

    async fn handle_peer_joined(&mut self, identity: Identity) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        info!("{} joined our room", identity);

        // We were first into the room: polite side, the joiner offers first.
        session.negotiator = Some(Negotiator::new(Role::Polite, session.backend.clone()));
        session.remote_identity = Some(identity.clone());
        self.events.peer_identity(Some(identity)).await;
    }

    async fn handle_incoming_offer(&mut self, from: Identity, sdp: String) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(negotiator) = session.negotiator.as_mut() else {
            warn!("Offer from {} before role assignment, dropping", from);
            return;
        };

        match negotiator.handle_remote_offer(sdp).await {
            Ok(Some(answer)) => {
                if let Err(e) = self
                    .transport
                    .send(ClientSignal::Answer {
                        to: from.clone(),
                        sdp: answer,
                    })
                    .await
                {
                    warn!("Failed to send answer: {}", e);
                }

                if session.remote_identity.as_ref() != Some(&from) {
                    session.remote_identity = Some(from.clone());
                    self.events.peer_identity(Some(from)).await;
                }
            }
            Ok(None) => {}
            Err(e) => error!("Failed to answer offer: {}", e),
        }
    }

    async fn handle_renegotiate_offer(&mut self, from_conn: ConnId, sdp: String) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(negotiator) = session.negotiator.as_mut() else {
            return;
        };

        match negotiator.handle_remote_offer(sdp).await {
            Ok(Some(answer)) => {
                if let Err(e) = self
                    .transport
                    .send(ClientSignal::RenegotiateAnswer {
                        to_conn: from_conn,
                        sdp: answer,
                    })
                    .await
                {
                    warn!("Failed to send renegotiation answer: {}", e);
                }
            }
            Ok(None) => debug!("Discarded colliding renegotiation offer"),
            Err(e) => error!("Renegotiation failed: {}", e),
        }
    }

    async fn apply_remote_answer(&mut self, sdp: String) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(negotiator) = session.negotiator.as_mut() else {
            return;
        };

        if let Err(e) = negotiator.handle_remote_answer(sdp).await {
            error!("Failed to apply answer: {}", e);
        }
    }

    async fn handle_remote_candidate(&mut self, candidate: IceCandidate) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(negotiator) = session.negotiator.as_mut() else {
            debug!("Candidate before role assignment, dropping");
            return;
        };

        if let Err(e) = negotiator.handle_remote_candidate(candidate).await {
            warn!("Failed to apply candidate: {}", e);
        }
    }

    async fn handle_leave_notice(&mut self, identity: Identity) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.remote_identity.as_ref() != Some(&identity) {
            return;
        }

        info!("{} left the room", identity);

        // Only the remote side is cleared; the local connection stays up so
        // the vacated slot can be filled by a fresh joiner.
        session.remote_identity = None;
        session.negotiator = None;

        self.events.remote_stream(None).await;
        self.events.peer_identity(None).await;
        self.events
            .notification(format!("{identity} left the room"), Severity::Info)
            .await;
    }

    async fn handle_join_rejected(&mut self, message: String) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.peer_rx = None;

        session.local_media.stop();
        if let Err(e) = session.backend.close().await {
            warn!("Error closing peer connection: {}", e);
        }

        self.events.local_stream(None).await;
        self.events.notification(message, Severity::Error).await;
    }

    async fn handle_peer_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::NegotiationNeeded => self.handle_negotiation_needed().await,

            PeerEvent::IceCandidate(candidate) => {
                let Some(session) = self.session.as_ref() else {
                    return;
                };
                let Some(remote) = session.remote_identity.clone() else {
                    debug!("No peer yet, dropping local candidate");
                    return;
                };

                if let Err(e) = self
                    .transport
                    .send(ClientSignal::IceCandidate {
                        to: remote,
                        candidate,
                    })
                    .await
                {
                    warn!("Failed to send candidate: {}", e);
                }
            }

            PeerEvent::RemoteStream(stream) => {
                self.events.remote_stream(Some(stream)).await;
            }

            PeerEvent::Disconnected => {
                warn!("Peer connection reported disconnect");
                self.events.remote_stream(None).await;
            }
        }
    }

    async fn handle_negotiation_needed(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (Some(negotiator), Some(remote)) = (
            session.negotiator.as_mut(),
            session.remote_identity.clone(),
        ) else {
            debug!("Negotiation trigger before the session is paired, dropping");
            return;
        };

        match negotiator.negotiation_needed().await {
            Ok(Some(sdp)) => {
                if let Err(e) = self
                    .transport
                    .send(ClientSignal::RenegotiateOffer { to: remote, sdp })
                    .await
                {
                    warn!("Failed to send renegotiation offer: {}", e);
                }
            }
            Ok(None) => {}
            // The negotiator released its flag; the next trigger retries.
            Err(e) => error!("Failed to produce renegotiation offer: {}", e),
        }
    }
}
