use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use crate::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tandem_core::{ClientSignal, ConnId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Connection handles are server-assigned, one per upgrade.
    let conn = ConnId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, conn, state.signaling.clone()))
}

async fn handle_socket(socket: WebSocket, conn: ConnId, service: SignalingService) {
    info!("New WebSocket connection: {}", conn);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_conn(conn, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientSignal>(&text) {
                        Ok(signal) => {
                            let cmd = command_for(conn, signal);
                            if let Err(e) = service.relay_cmd_tx.send(cmd).await {
                                error!("Relay died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid ClientSignal from {}: {:?}", conn, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs on every exit path, so the directory entry is always released.
    service.remove_conn(&conn);
    let _ = service
        .relay_cmd_tx
        .send(RelayCommand::Disconnect { conn })
        .await;

    info!("WebSocket disconnected: {}", conn);
}

fn command_for(conn: ConnId, signal: ClientSignal) -> RelayCommand {
    match signal {
        ClientSignal::JoinRequest { identity, room_id } => RelayCommand::Join {
            conn,
            identity,
            room_id,
        },
        ClientSignal::Offer { to, sdp } => RelayCommand::Offer { conn, to, sdp },
        ClientSignal::Answer { to, sdp } => RelayCommand::Answer { conn, to, sdp },
        ClientSignal::RenegotiateOffer { to, sdp } => {
            RelayCommand::RenegotiateOffer { conn, to, sdp }
        }
        ClientSignal::RenegotiateAnswer { to_conn, sdp } => {
            RelayCommand::RenegotiateAnswer { conn, to_conn, sdp }
        }
        ClientSignal::IceCandidate { to, candidate } => {
            RelayCommand::IceCandidate { conn, to, candidate }
        }
        ClientSignal::ToggleMedia { to, kind, enabled } => RelayCommand::ToggleMedia {
            conn,
            to,
            kind,
            enabled,
        },
        ClientSignal::Leave { room_id, identity } => RelayCommand::Leave {
            conn,
            room_id,
            identity,
        },
    }
}
