use crate::directory::{Directory, JoinError};
use crate::relay::relay_command::RelayCommand;
use crate::signaling::SignalSink;
use std::sync::Arc;
use tandem_core::{ConnId, Identity, RoomId, ServerSignal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The signaling relay: resolves each inbound command to a destination
/// connection and forwards the payload with its envelope through the sink.
///
/// The actor owns the [`Directory`] and drains its command channel one
/// command at a time, so the check-then-mutate sequences in join and cleanup
/// are serialized without locks.
pub struct Relay {
    directory: Directory,
    command_rx: mpsc::Receiver<RelayCommand>,
    sink: Arc<dyn SignalSink>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, sink: Arc<dyn SignalSink>) -> Self {
        Self {
            directory: Directory::new(),
            command_rx,
            sink,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Join {
                conn,
                identity,
                room_id,
            } => self.handle_join(conn, identity, room_id).await,

            RelayCommand::Offer { conn, to, sdp } => {
                let Some(from) = self.directory.identity_of(&conn).cloned() else {
                    debug!("Dropping offer from unjoined connection {}", conn);
                    return;
                };
                self.forward(&to, ServerSignal::IncomingOffer { from, sdp })
                    .await;
            }

            RelayCommand::Answer { conn, to, sdp } => {
                let Some(from) = self.directory.identity_of(&conn).cloned() else {
                    debug!("Dropping answer from unjoined connection {}", conn);
                    return;
                };
                self.forward(&to, ServerSignal::IncomingAnswer { from, sdp })
                    .await;
            }

            RelayCommand::RenegotiateOffer { conn, to, sdp } => {
                self.forward(&to, ServerSignal::RenegotiateOffer { from_conn: conn, sdp })
                    .await;
            }

            RelayCommand::RenegotiateAnswer { conn, to_conn, sdp } => {
                self.sink
                    .send(to_conn, ServerSignal::RenegotiateAnswer { from_conn: conn, sdp })
                    .await;
            }

            RelayCommand::IceCandidate { conn: _, to, candidate } => {
                self.forward(&to, ServerSignal::IceCandidate { candidate })
                    .await;
            }

            RelayCommand::ToggleMedia {
                conn: _,
                to,
                kind,
                enabled,
            } => {
                self.forward(&to, ServerSignal::ToggleMedia { kind, enabled })
                    .await;
            }

            RelayCommand::Leave {
                conn: _,
                room_id: _,
                identity,
            } => self.handle_leave(identity).await,

            RelayCommand::Disconnect { conn } => {
                if let Some(dep) = self.directory.cleanup_conn(&conn) {
                    info!(
                        "Connection {} dropped, released identity {} from room {}",
                        conn, dep.identity, dep.room_id
                    );
                }
            }
        }
    }

    async fn handle_join(&mut self, conn: ConnId, identity: Identity, room_id: RoomId) {
        match self
            .directory
            .try_join(identity.clone(), conn, room_id.clone())
        {
            Err(JoinError::IdentityInUse) => {
                warn!("Join rejected for {}: identity in use", identity);
                self.sink
                    .send(
                        conn,
                        ServerSignal::InUseError {
                            message: "This identity is already in use, try a new one".to_owned(),
                        },
                    )
                    .await;
            }

            Err(JoinError::RoomFull) => {
                warn!("Join rejected for {}: room {} is full", identity, room_id);
                self.sink
                    .send(
                        conn,
                        ServerSignal::RoomFullError {
                            message: "Room is already full".to_owned(),
                        },
                    )
                    .await;
            }

            Ok(()) => {
                info!("{} joined room {}", identity, room_id);

                let others: Vec<(Identity, ConnId)> = self
                    .directory
                    .occupants(&room_id)
                    .into_iter()
                    .filter(|(other, _)| *other != identity)
                    .collect();

                // The joiner learns the incumbent so it can address the
                // initial offer; the incumbent learns the joiner.
                let peer = others.first().map(|(other, _)| other.clone());
                self.sink
                    .send(
                        conn,
                        ServerSignal::JoinAccepted {
                            identity: identity.clone(),
                            room_id,
                            peer,
                        },
                    )
                    .await;

                for (_, other_conn) in others {
                    self.sink
                        .send(
                            other_conn,
                            ServerSignal::PeerJoined {
                                identity: identity.clone(),
                            },
                        )
                        .await;
                }
            }
        }
    }

    async fn handle_leave(&mut self, identity: Identity) {
        let Some(dep) = self.directory.cleanup_identity(&identity) else {
            debug!("Leave for inactive identity {}", identity);
            return;
        };

        info!("{} left room {}", identity, dep.room_id);

        for (_, other_conn) in self.directory.occupants(&dep.room_id) {
            self.sink
                .send(
                    other_conn,
                    ServerSignal::LeaveNotice {
                        room_id: dep.room_id.clone(),
                        identity: identity.clone(),
                    },
                )
                .await;
        }

        self.sink.disconnect(dep.conn).await;
    }

    /// Unicast to an identity's current connection. Unknown targets are
    /// dropped without a reply: the sender's only recovery is to treat the
    /// peer as gone, and the disconnect path already covers that.
    async fn forward(&self, to: &Identity, signal: ServerSignal) {
        let Some(conn) = self.directory.resolve(to) else {
            debug!("Dropping signal for unknown identity {}", to);
            return;
        };
        self.sink.send(conn, signal).await;
    }
}
