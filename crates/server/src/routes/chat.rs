//! Chat WebSocket endpoint.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use common::{ConnectionId, SessionId};
use serde::Deserialize;

use crate::AppState;
use crate::wire::{ClientFrame, ServerFrame};

/// Query parameters for the WebSocket upgrade.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Session to resume. A missing or malformed value starts a new session.
    pub session: Option<String>,
}

/// GET /ws: upgrades to a chat connection.
pub async fn upgrade(
    ws: WebSocketUpgrade,
    Query(query): Query<ConnectQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let session = query
        .session
        .as_deref()
        .and_then(|s| s.parse::<SessionId>().ok())
        .unwrap_or_default();

    ws.on_upgrade(move |socket| serve_connection(socket, state, session))
}

#[tracing::instrument(skip(socket, state))]
async fn serve_connection(mut socket: WebSocket, state: Arc<AppState>, session: SessionId) {
    let connection = ConnectionId::new();
    let greeting = match state.hub.connect(connection, session) {
        Ok(greeting) => greeting,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting connection");
            return;
        }
    };

    let opened = send(&mut socket, ServerFrame::Session { session_id: session })
        .await
        .is_ok()
        && send(&mut socket, ServerFrame::bot(greeting)).await.is_ok();
    if opened {
        pump(&mut socket, &state, connection).await;
    }

    state.hub.disconnect(connection);
}

/// Handles inbound frames one at a time until the socket closes.
async fn pump(socket: &mut WebSocket, state: &AppState, connection: ConnectionId) {
    while let Some(frame) = socket.recv().await {
        let text = match frame {
            Ok(Message::Text(text)) => ClientFrame::message_text(text.as_str()),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(error = %e, "websocket receive failed");
                break;
            }
        };

        let reply = match state.hub.handle_message(connection, &text) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "dropping connection");
                metrics::counter!("ws_protocol_errors_total").increment(1);
                break;
            }
        };

        if send(socket, ServerFrame::bot(reply)).await.is_err() {
            break;
        }
    }
}

async fn send(socket: &mut WebSocket, frame: ServerFrame) -> Result<(), axum::Error> {
    socket.send(Message::Text(frame.to_json().into())).await
}
