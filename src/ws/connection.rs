//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered store changes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::EventDto;
use crate::domain::{EventId, StoreChange};
use crate::store::EventStore;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching changes from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut change_rx: broadcast::Receiver<StoreChange>,
    event_store: Arc<EventStore>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &event_store).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Change from the store feed
            change = change_rx.recv() => {
                match change {
                    Ok(store_change) => {
                        if subs.matches(store_change.event_id()) {
                            let msg = WsMessage {
                                id: uuid::Uuid::new_v4().to_string(),
                                msg_type: WsMessageType::Change,
                                timestamp: chrono::Utc::now(),
                                payload: serde_json::to_value(&store_change).unwrap_or_default(),
                            };
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind change feed");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    event_store: &EventStore,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        let err = error_message(String::new(), 400, "malformed JSON");
        return serde_json::to_string(&err).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload.clone()) else {
        let err = error_message(msg.id, 404, "unknown command");
        return serde_json::to_string(&err).ok();
    };

    let response = match command {
        WsCommand::Subscribe { event_ids } => {
            let wildcard = event_ids.iter().any(|s| s == "*");
            let ids: Vec<EventId> = event_ids
                .iter()
                .filter(|s| s.as_str() != "*")
                .map(|s| EventId::from_raw(s.as_str()))
                .collect();
            subs.subscribe(&ids, wildcard);
            WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "subscribed": ids.iter().map(|id| id.as_str().to_string()).collect::<Vec<_>>(),
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            }
        }
        WsCommand::Unsubscribe { event_ids } => {
            let ids: Vec<EventId> = event_ids
                .iter()
                .map(|s| EventId::from_raw(s.as_str()))
                .collect();
            subs.unsubscribe(&ids);
            WsMessage {
                id: msg.id,
                msg_type: WsMessageType::Response,
                timestamp: chrono::Utc::now(),
                payload: serde_json::json!({
                    "unsubscribed": ids.iter().map(|id| id.as_str().to_string()).collect::<Vec<_>>(),
                    "remaining_count": subs.count(),
                }),
            }
        }
        WsCommand::Snapshot {} => match event_store.list().await {
            Ok(events) => {
                let data: Vec<EventDto> = events.iter().map(EventDto::from).collect();
                let count = data.len();
                WsMessage {
                    id: msg.id,
                    msg_type: WsMessageType::Response,
                    timestamp: chrono::Utc::now(),
                    payload: serde_json::json!({
                        "events": data,
                        "count": count,
                    }),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "snapshot read failed");
                error_message(msg.id, 500, "snapshot read failed")
            }
        },
    };

    serde_json::to_string(&response).ok()
}

fn error_message(id: String, code: u16, message: &str) -> WsMessage {
    WsMessage {
        id,
        msg_type: WsMessageType::Error,
        timestamp: chrono::Utc::now(),
        payload: serde_json::json!({
            "code": code,
            "message": message,
        }),
    }
}
