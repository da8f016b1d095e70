//! Multi-room WebSocket Chat Relay Library
//!
//! Clients connect to `/chat/<room>`, join under a display name and
//! exchange text messages that are broadcast to everyone in the room.
//!
//! # Features
//! - Lazily created, named rooms shared by all connections
//! - Join/leave announcements
//! - Room-wide chat broadcast
//! - Private command replies (`/joke`)
//! - Best-effort delivery: one dead connection never blocks a room
//!
//! # Architecture
//! - `RoomRegistry` owns every `Room`, created on first lookup
//! - `Room` guards its member set with a mutex and fans messages out
//! - Each connection owns a `Member` that decodes frames and drives its room
//! - The `handler` task is the transport: it feeds frames in and drains the
//!   member's outbound channel back to the socket
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use room_relay::{handle_connection, RoomRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let registry = Arc::new(RoomRegistry::new());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         tokio::spawn(handle_connection(stream, registry.clone(), 32));
//!     }
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod member;
pub mod message;
pub mod outbox;
pub mod registry;
pub mod room;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::ServerConfig;
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use member::Member;
pub use message::{ClientMessage, ServerMessage};
pub use outbox::{Outbox, Transmit};
pub use registry::RoomRegistry;
pub use room::Room;
pub use types::MemberId;
