use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use common::log;

use crate::messages::{ClientMessage, ErrorResponse, ServerMessage};
use crate::session::GameSession;
use crate::web_server::WebServerState;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(128);

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(payload) => {
                    if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => log!("Failed to encode server message: {}", e),
            }
        }
    });

    let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed).to_string();
    log!("[session:{}] Client connected", session_id);

    let mut session: Option<GameSession> = None;

    while let Some(result) = ws_receiver.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                log!("[session:{}] WebSocket error: {}", session_id, e);
                break;
            }
        };

        let payload = match msg {
            Message::Text(text) => text.to_string(),
            Message::Close(_) => break,
            _ => continue,
        };

        let client_message: ClientMessage = match serde_json::from_str(&payload) {
            Ok(message) => message,
            Err(e) => {
                log!("[session:{}] Failed to decode client message: {}", session_id, e);
                send_to_client(&tx, make_error_response(format!("Malformed message: {}", e)))
                    .await;
                continue;
            }
        };

        let responses = match client_message {
            ClientMessage::NewGame { settings } => {
                let resolved = settings.unwrap_or(state.default_game_settings);
                let new_session = GameSession::create(session_id.clone(), resolved).await;
                let update = new_session.state_update();
                session = Some(new_session);
                vec![update]
            }
            ClientMessage::PlaceMark { index } => match session.as_mut() {
                Some(active) => active.handle_place(index).await,
                None => vec![make_error_response(
                    "No active game. Send new_game first.".to_string(),
                )],
            },
            ClientMessage::Reset => match session.as_mut() {
                Some(active) => active.handle_reset().await,
                None => vec![make_error_response(
                    "No active game. Send new_game first.".to_string(),
                )],
            },
        };

        for response in responses {
            send_to_client(&tx, response).await;
        }
    }

    log!("[session:{}] Client disconnected", session_id);
    drop(tx);
    let _ = send_task.await;
}

async fn send_to_client(tx: &mpsc::Sender<ServerMessage>, message: ServerMessage) {
    if tx.send(message).await.is_err() {
        log!("Failed to queue server message: send channel closed");
    }
}

fn make_error_response(message: String) -> ServerMessage {
    ServerMessage::Error(ErrorResponse { message })
}
