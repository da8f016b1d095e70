//! Send capability for one connection
//!
//! The transport hands each member something that implements `Transmit`.
//! Rooms hold `Outbox` clones, never the member itself.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::types::MemberId;

/// Best-effort, non-blocking delivery of one serialized frame
pub trait Transmit: Send + Sync {
    fn transmit(&self, data: String) -> Result<(), SendError>;
}

impl Transmit for mpsc::Sender<String> {
    fn transmit(&self, data: String) -> Result<(), SendError> {
        self.try_send(data).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::Full,
            mpsc::error::TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}

/// Cloneable handle to a member's send capability
#[derive(Clone)]
pub struct Outbox {
    id: MemberId,
    sink: Arc<dyn Transmit>,
}

impl Outbox {
    pub fn new(id: MemberId, sink: Arc<dyn Transmit>) -> Self {
        Self { id, sink }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Hand `data` to the sink
    ///
    /// Callers decide whether a failure matters; the broadcast path drops it.
    pub fn send(&self, data: String) -> Result<(), SendError> {
        self.sink.transmit(data)
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox").field("id", &self.id).finish()
    }
}
