//! WebSocket handler
//!
//! Accepts client connections and runs one reader task and one writer task
//! per connection until the session is closed.

use crate::connection::Session;
use crate::handlers::{MessageDispatcher, RelayError};
use crate::protocol::CloseCode;
use crate::server::RelayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message as WsMessage, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use relay_core::{codec, Message, SUPPORTED_VERSIONS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the writer gets to flush queued frames and the close frame
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// WebSocket mediator handler
pub async fn relay_handler(
    State(state): State<RelayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: RelayState, socket: WebSocket) {
    let (tx, rx) = mpsc::channel::<String>(state.config().relay.outbound_buffer.max(1));
    let session = Session::new(tx);

    tracing::info!(session_id = %session.id(), "WebSocket connection established");

    // The ack is queued before the reader starts, so it is always the first frame out
    let ack = codec::encode(&Message::ack(SUPPORTED_VERSIONS));
    if let Err(e) = session.send(ack) {
        tracing::warn!(session_id = %session.id(), error = %e, "Failed to queue ack");
        state.close_session(&session, CloseCode::UnknownError);
    }

    let (ws_sink, ws_stream) = socket.split();

    let mut writer = tokio::spawn(write_outbound(
        state.clone(),
        session.clone(),
        ws_sink,
        rx,
    ));
    let reader = tokio::spawn(read_inbound(state.clone(), session.clone(), ws_stream));

    session.closed().await;

    // A pending room service call has nothing left to deliver to
    reader.abort();

    if tokio::time::timeout(CLOSE_TIMEOUT, &mut writer).await.is_err() {
        tracing::debug!(session_id = %session.id(), "Writer did not finish, aborting");
        writer.abort();
    }

    tracing::info!(
        session_id = %session.id(),
        user_id = ?session.user_id(),
        close_code = ?session.close_code(),
        age_ms = u64::try_from(session.age().as_millis()).unwrap_or(u64::MAX),
        "WebSocket connection closed"
    );
}

/// Read frames from the client and dispatch them until the session ends
async fn read_inbound(
    state: RelayState,
    session: Arc<Session>,
    mut ws_stream: SplitStream<WebSocket>,
) {
    let close_code = loop {
        let Some(next) = ws_stream.next().await else {
            tracing::debug!(session_id = %session.id(), "Client stream ended");
            break CloseCode::Normal;
        };

        match next {
            Ok(WsMessage::Text(text)) => {
                if handle_text(&state, &session, &text).await.is_some() {
                    return;
                }
            }
            Ok(WsMessage::Binary(_)) => {
                tracing::debug!(session_id = %session.id(), "Binary messages not supported");
                break CloseCode::DecodeError;
            }
            Ok(WsMessage::Ping(_) | WsMessage::Pong(_)) => {
                // Pong is handled automatically by axum
                tracing::trace!(session_id = %session.id(), "Ping/pong received");
            }
            Ok(WsMessage::Close(_)) => {
                tracing::info!(session_id = %session.id(), "Client closed connection");
                break CloseCode::Normal;
            }
            Err(e) => {
                let err = RelayError::Transport(e.to_string());
                tracing::warn!(session_id = %session.id(), error = %err, "WebSocket error");
                break err.to_close_code();
            }
        }
    };

    state.close_session(&session, close_code);
}

/// Dispatch one text frame, closing the session when the frame ends it.
///
/// Returns the close code when the session was ended by this frame.
async fn handle_text(state: &RelayState, session: &Arc<Session>, text: &str) -> Option<CloseCode> {
    let code = match MessageDispatcher::dispatch(state, session, text).await {
        Ok(None) => return None,
        Ok(Some(code)) => code,
        Err(e) => {
            tracing::warn!(
                session_id = %session.id(),
                user_id = ?session.user_id(),
                error = %e,
                "Closing connection due to error"
            );
            e.to_close_code()
        }
    };

    state.close_session(session, code);
    Some(code)
}

/// Write queued frames to the client, then the close frame
async fn write_outbound(
    state: RelayState,
    session: Arc<Session>,
    mut ws_sink: SplitSink<WebSocket, WsMessage>,
    mut rx: mpsc::Receiver<String>,
) {
    loop {
        tokio::select! {
            biased;

            frame = rx.recv() => {
                let Some(frame) = frame else { break };
                if let Err(e) = ws_sink.send(WsMessage::Text(frame)).await {
                    tracing::warn!(
                        session_id = %session.id(),
                        error = %e,
                        "Failed to send message to WebSocket"
                    );
                    state.close_session(&session, CloseCode::TransportError);
                    return;
                }
            }
            () = session.closed() => break,
        }
    }

    // Frames queued before the close still go out, in order
    while let Ok(frame) = rx.try_recv() {
        if ws_sink.send(WsMessage::Text(frame)).await.is_err() {
            return;
        }
    }

    let code = session.close_code().unwrap_or(CloseCode::Normal);
    let frame = CloseFrame {
        code: code.as_u16(),
        reason: code.description().into(),
    };

    if ws_sink.send(WsMessage::Close(Some(frame))).await.is_err() {
        tracing::trace!(session_id = %session.id(), "Close frame not delivered");
    }
    let _ = ws_sink.close().await;
}
