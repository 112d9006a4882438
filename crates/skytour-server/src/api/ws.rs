//! WebSocket streaming of fleet snapshots.
use crate::state::{AppState, FleetEvent};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

/// Handler for WebSocket connections.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(params): Query<WsQuery>,
) -> axum::response::Response {
    let drone_filter = params.drone_id;
    ws.on_upgrade(move |socket| handle_socket(socket, state, drone_filter))
        .into_response()
}

#[derive(Debug, Deserialize, Default)]
pub struct WsQuery {
    drone_id: Option<String>,
}

/// Full snapshot JSON, or just the one drone when filtered.
fn render(event: &FleetEvent, drone_filter: Option<&str>) -> Option<String> {
    match drone_filter {
        None => Some(event.payload.as_ref().to_owned()),
        Some(drone_id) => {
            let drone = event.snapshot.drone(drone_id)?;
            serde_json::to_string(drone).ok()
        }
    }
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>, drone_filter: Option<String>) {
    // Current state first so new viewers are not blank until the next tick.
    // Every event on `rx` is newer than `initial`.
    let (mut rx, initial) = state.subscribe_with_snapshot();
    let first = match drone_filter.as_deref() {
        None => serde_json::to_string(&initial).ok(),
        Some(drone_id) => initial
            .drone(drone_id)
            .and_then(|d| serde_json::to_string(d).ok()),
    };
    if let Some(text) = first {
        if socket.send(Message::Text(text)).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Ping(payload))) => {
                        if socket.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        let Some(text) = render(&event, drone_filter.as_deref()) else {
                            continue;
                        };
                        if socket.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        // Drop missed updates; a newer snapshot will arrive soon.
                        tracing::debug!("Stream subscriber lagged by {} snapshot(s)", skipped);
                        continue;
                    }
                    Err(_) => break,
                }
            }
        }
    }
}
