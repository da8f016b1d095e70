//! Send capabilities used by unit tests

use std::sync::Mutex;

use serde_json::Value;

use crate::error::SendError;
use crate::outbox::Transmit;

/// Records every frame it is given
#[derive(Debug, Default)]
pub struct Recorder {
    frames: Mutex<Vec<String>>,
}

impl Recorder {
    /// Frames received so far, in order
    pub fn sent(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    /// Frames received so far, parsed as JSON
    pub fn messages(&self) -> Vec<Value> {
        self.sent()
            .iter()
            .map(|f| serde_json::from_str(f).unwrap())
            .collect()
    }
}

impl Transmit for Recorder {
    fn transmit(&self, data: String) -> Result<(), SendError> {
        self.frames.lock().unwrap().push(data);
        Ok(())
    }
}

/// Fails every send, like a connection that is already gone
#[derive(Debug, Default)]
pub struct Broken;

impl Transmit for Broken {
    fn transmit(&self, _data: String) -> Result<(), SendError> {
        Err(SendError::ChannelClosed)
    }
}
