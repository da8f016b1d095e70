//! Room struct definition
//!
//! A named broadcast domain. Rooms are created by the registry and live
//! for the rest of the process, even when nobody is in them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, trace};

use crate::member::Member;
use crate::message::ServerMessage;
use crate::outbox::Outbox;
use crate::types::MemberId;

/// Chat room
///
/// The member set is guarded by a single mutex. Broadcast copies the
/// recipients out and sends after the lock is released.
#[derive(Debug)]
pub struct Room {
    /// Room name, fixed at creation
    name: String,
    /// Joined members: MemberId -> send capability
    members: Mutex<HashMap<MemberId, Outbox>>,
}

impl Room {
    /// Create an empty room
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Mutex::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a member to the room
    ///
    /// Joining twice keeps a single entry.
    pub fn join(&self, member: &Member) {
        self.members()
            .insert(member.id(), member.outbox().clone());
    }

    /// Remove a member from the room; absent members are ignored
    pub fn leave(&self, member: &Member) {
        self.members().remove(&member.id());
    }

    /// Send `msg` to every current member
    ///
    /// A failed send to one member never stops delivery to the others.
    pub fn broadcast(&self, msg: &ServerMessage) {
        let json = match msg.to_json() {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize message for {}: {}", self.name, e);
                return;
            }
        };

        let recipients: Vec<Outbox> = self.members().values().cloned().collect();
        for recipient in recipients {
            if let Err(e) = recipient.send(json.clone()) {
                trace!("Dropped message to {} in {}: {}", recipient.id(), self.name, e);
            }
        }
    }

    /// Check if a member is in this room
    pub fn contains(&self, id: MemberId) -> bool {
        self.members().contains_key(&id)
    }

    /// Get the number of members in the room
    pub fn member_count(&self) -> usize {
        self.members().len()
    }

    fn members(&self) -> MutexGuard<'_, HashMap<MemberId, Outbox>> {
        // Map updates never panic midway, so a poisoned map is still consistent
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
