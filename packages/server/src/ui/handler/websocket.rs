//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Connection, InboundMessage, RoomId},
    infrastructure::dto::websocket::ClientMessageDto,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::try_from(room_id.clone()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid room_id '{}': {}", room_id, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id)))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sender.
///
/// The task ends when the socket rejects a write, or when every sender of the
/// queue is gone (the room session dropped the connection).
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Decode one text frame. Malformed or unknown messages are skipped.
fn decode_message(text: &str) -> Option<InboundMessage> {
    let dto = match serde_json::from_str::<ClientMessageDto>(text) {
        Ok(dto) => dto,
        Err(e) => {
            tracing::warn!("Skipping malformed message: {}", e);
            return None;
        }
    };
    let message_type = dto.message_type.clone();
    let inbound = dto.into_inbound();
    if inbound.is_none() {
        tracing::debug!("Ignoring message of unknown type '{}'", message_type);
    }
    inbound
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let (sender, mut receiver) = socket.split();

    // Outbound queue of this connection, drained by the writer task
    let (tx, rx) = mpsc::channel(state.outbound_buffer);
    let mut send_task = pusher_loop(rx, sender);

    let mut context = state
        .connect_participant_usecase
        .execute(room_id, Connection::new(tx))
        .await;

    loop {
        tokio::select! {
            msg = receiver.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::debug!("WebSocket error on '{}': {}", context.connection_id(), e);
                        break;
                    }
                    None => break,
                };

                match msg {
                    Message::Text(text) => {
                        tracing::debug!("Received text: {}", text.as_str());
                        if let Some(inbound) = decode_message(text.as_str()) {
                            state
                                .dispatch_message_usecase
                                .execute(&mut context, inbound)
                                .await;
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Connection '{}' requested close", context.connection_id());
                        break;
                    }
                    _ => {}
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Writer for '{}' stopped", context.connection_id());
                break;
            }
        }
    }

    send_task.abort();
    state.disconnect_participant_usecase.execute(&context).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClientCommand;

    #[test]
    fn test_decode_skips_malformed_json() {
        // テスト項目: JSON として不正なメッセージは None（スキップ）になる
        assert!(decode_message("not json").is_none());
        assert!(decode_message(r#"{"user": "alice"}"#).is_none());
    }

    #[test]
    fn test_decode_join() {
        // テスト項目: join メッセージがデコードされる
        // given (前提条件):
        let raw = r#"{"type": "join", "user": "alice"}"#;

        // when (操作):
        let inbound = decode_message(raw).unwrap();

        // then (期待する結果):
        assert_eq!(inbound.command, ClientCommand::Join);
        assert_eq!(inbound.user.map(|u| u.into_string()), Some("alice".to_string()));
    }
}
