//! WebSocket connection handler
//!
//! Handles individual client connections: WebSocket handshake, room
//! selection from the request path, and bidirectional communication
//! between the socket and the connection's `Member`.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::member::Member;
use crate::registry::RoomRegistry;

/// Path prefix rooms are served under: `/chat/<room>`
const ROOM_PATH_PREFIX: &str = "/chat/";

/// Handle a new TCP connection
///
/// Performs the WebSocket handshake, binds the connection to a room member
/// and relays frames until either side closes. A malformed inbound frame
/// ends the connection and is returned as the error.
pub async fn handle_connection(
    stream: TcpStream,
    registry: Arc<RoomRegistry>,
    outbound_buffer: usize,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    // WebSocket handshake, capturing the room from the request path
    let mut room_name = None;
    let callback = |req: &Request, resp: Response| match room_from_path(req.uri().path()) {
        Some(room) => {
            room_name = Some(room);
            Ok(resp)
        }
        None => {
            let mut err = ErrorResponse::new(Some(format!(
                "expected {}<room>",
                ROOM_PATH_PREFIX
            )));
            *err.status_mut() = StatusCode::NOT_FOUND;
            Err(err)
        }
    };
    let ws_stream = tokio_tungstenite::accept_hdr_async(stream, callback).await?;
    let room_name = room_name
        .ok_or_else(|| AppError::BadMessage("handshake without room".to_string()))?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Member -> socket channel; the sender is the member's send capability
    let (msg_tx, mut msg_rx) = mpsc::channel::<String>(outbound_buffer);
    let mut member = Member::new(Arc::new(msg_tx), &room_name, &registry);
    let member_id = member.id();
    info!("Member {} connected from {} to room {:?}", member_id, peer_addr, room_name);

    // Spawn write task (queued frames -> WebSocket)
    let mut write_task = tokio::spawn(async move {
        while let Some(json) = msg_rx.recv().await {
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, ending write task");
                break;
            }
        }
        debug!("Write task ended for member");

        // Send close frame when done
        let _ = ws_sender.close().await;
    });

    // Read loop (WebSocket -> Member), one handle_message per text frame
    let result = loop {
        tokio::select! {
            frame = ws_receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Err(e) = member.handle_message(&text) {
                        warn!("Malformed message from {}: {}", member_id, e);
                        break Err(e);
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    debug!("Member {} sent close frame", member_id);
                    break Ok(());
                }
                Some(Ok(_)) => {
                    // Ping, pong and binary frames carry nothing for the room
                }
                Some(Err(e)) => {
                    debug!("WebSocket error for {}: {}", member_id, e);
                    break Err(e.into());
                }
            },
            _ = &mut write_task => {
                debug!("Write task completed for {}", member_id);
                break Ok(());
            }
        }
    };

    // Leaving drops the room's copy of the sender, which ends the write task
    member.handle_close();

    info!("Member {} disconnected", member_id);

    result
}

/// Extract the room name from a `/chat/<room>` request path
///
/// The segment is percent-decoded, so `/chat/my%20room` names `my room`.
/// Segments that do not decode to UTF-8 are rejected.
fn room_from_path(path: &str) -> Option<String> {
    let segment = path
        .strip_prefix(ROOM_PATH_PREFIX)
        .filter(|room| !room.is_empty() && !room.contains('/'))?;

    urlencoding::decode(segment).ok().map(|room| room.into_owned())
}
