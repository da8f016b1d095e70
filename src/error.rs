//! Error types for the relay
//!
//! `AppError` ends a connection; `SendError` is what a send capability
//! reports and is always discarded by the broadcast path.

use thiserror::Error;

/// Application-level errors
///
/// Every variant is fatal to the connection it happened on. The transport
/// closes the socket and the member leaves its room.
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Inbound frame is not a JSON envelope
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Envelope parsed but its `type` is missing, unknown, or lacks its field
    #[error("bad message: {0}")]
    BadMessage(String),
}

/// Message send errors
///
/// Returned by a send capability that could not hand the frame off.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,

    /// Outbound queue is full (slow or stalled peer)
    #[error("Outbound queue full")]
    Full,
}
