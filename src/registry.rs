//! Room registry
//!
//! Maps room names to the single `Room` for that name. Rooms are created on
//! first lookup and never removed. Owned by the server and shared with
//! every connection through an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::room::Room;

/// Process-wide room lookup
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// All rooms ever referenced: name -> Room
    rooms: Mutex<HashMap<String, Arc<Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the room called `name`, creating it if needed
    ///
    /// Names are case-sensitive and used as given, including the empty
    /// string. Lookup and insert happen under one lock, so concurrent
    /// callers always share one instance.
    pub fn get(&self, name: &str) -> Arc<Room> {
        let mut rooms = self.rooms.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(room) = rooms.get(name) {
            return room.clone();
        }

        info!("Room {:?} created", name);
        let room = Arc::new(Room::new(name));
        rooms.insert(name.to_string(), room.clone());
        room
    }

    /// Number of rooms created so far
    pub fn len(&self) -> usize {
        self.rooms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
