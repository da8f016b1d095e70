//! Member struct definition
//!
//! One connection's session: its send capability, its room, and the
//! display name it joined with. The transport calls `handle_message` once
//! per inbound frame and `handle_close` once when the connection ends.

use std::sync::Arc;

use tracing::{debug, info};

use crate::command;
use crate::error::AppError;
use crate::message::{ClientMessage, ServerMessage};
use crate::outbox::{Outbox, Transmit};
use crate::registry::RoomRegistry;
use crate::room::Room;
use crate::types::MemberId;

/// Rendering of a display name that was never set
const UNSET_NAME: &str = "null";

/// Connected member
#[derive(Debug)]
pub struct Member {
    /// Send capability, shared with the room once joined
    outbox: Outbox,
    /// Room this connection targets
    room: Arc<Room>,
    /// Display name (None before join)
    name: Option<String>,
}

impl Member {
    /// Create a member for `room_name`; it does not join until asked to
    pub fn new(sink: Arc<dyn Transmit>, room_name: &str, registry: &RoomRegistry) -> Self {
        let id = MemberId::new();
        let room = registry.get(room_name);
        debug!("Member {} created in room {:?}", id, room.name());

        Self {
            outbox: Outbox::new(id, sink),
            room,
            name: None,
        }
    }

    pub fn id(&self) -> MemberId {
        self.outbox.id()
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn room(&self) -> &Arc<Room> {
        &self.room
    }

    /// Display name, if joined
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Send a raw frame to this member only
    ///
    /// Delivery is best-effort: a closed or full connection is ignored.
    pub fn send(&self, data: String) {
        let _ = self.outbox.send(data);
    }

    /// Decode and dispatch one inbound frame
    ///
    /// An error means the frame was malformed and the connection should be
    /// closed.
    pub fn handle_message(&mut self, raw: &str) -> Result<(), AppError> {
        let msg = ClientMessage::parse(raw)?;
        debug!("Member {} sent {:?}", self.id(), msg);

        match msg {
            ClientMessage::Command { command } => self.handle_command(command),
            ClientMessage::Join { name } => self.handle_join(name),
            ClientMessage::Chat { text } => self.handle_chat(text),
        }
        Ok(())
    }

    /// Take a display name, enter the room and announce it to everyone there
    pub fn handle_join(&mut self, name: String) {
        info!("Member {} joined {:?} as {:?}", self.id(), self.room.name(), name);
        let text = format!("{} joined \"{}\".", name, self.room.name());
        self.name = Some(name);

        self.room.join(self);
        self.room.broadcast(&ServerMessage::note(text));
    }

    /// Broadcast a chat line under this member's name
    pub fn handle_chat(&self, text: String) {
        self.room.broadcast(&ServerMessage::Chat {
            name: self.name.clone(),
            text,
        });
    }

    /// Answer a command privately; unknown commands are ignored
    pub fn handle_command(&self, command: &str) {
        let Some(reply) = command::respond(command) else {
            debug!("Member {} sent unknown command {:?}", self.id(), command);
            return;
        };

        match ServerMessage::note(reply).to_json() {
            Ok(json) => self.send(json),
            Err(e) => debug!("Failed to serialize reply to {}: {}", command, e),
        }
    }

    /// Leave the room and tell the members still in it
    ///
    /// A member that never joined is announced as `null`, the same way its
    /// chat lines carry a null name.
    pub fn handle_close(self) {
        self.room.leave(&self);

        let name = self.name.as_deref().unwrap_or(UNSET_NAME);
        info!("Member {} ({:?}) left {:?}", self.id(), name, self.room.name());
        self.room
            .broadcast(&ServerMessage::note(format!("{} left {}.", name, self.room.name())));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{Broken, Recorder};

    fn member(registry: &RoomRegistry, room: &str) -> (Member, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (Member::new(recorder.clone(), room, registry), recorder)
    }

    #[test]
    fn test_member_creation_does_not_join() {
        let registry = RoomRegistry::new();
        let (alice, sent) = member(&registry, "R");

        assert!(alice.name().is_none());
        assert_eq!(alice.room().name(), "R");
        assert!(!alice.room().contains(alice.id()));
        assert!(sent.sent().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_join_announces_to_everyone() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        let (mut alice, alice_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());

        alice.handle_message(r#"{"type":"join","name":"alice"}"#).unwrap();

        assert_eq!(alice.name(), Some("alice"));
        assert!(alice.room().contains(alice.id()));
        assert_eq!(alice.room().member_count(), 2);

        let note = json!({"type": "note", "text": "alice joined \"R\"."});
        assert_eq!(alice_sent.messages(), vec![note.clone()]);
        assert_eq!(bob_sent.messages().last(), Some(&note));
        assert_eq!(bob_sent.messages().len(), 2);
    }

    #[test]
    fn test_chat_broadcasts_with_name() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        let (mut alice, alice_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());
        alice.handle_join("alice".to_string());

        bob.handle_message(r#"{"type":"chat","text":"hello"}"#).unwrap();

        let chat = json!({"type": "chat", "name": "bob", "text": "hello"});
        assert_eq!(bob_sent.messages().last(), Some(&chat));
        assert_eq!(alice_sent.messages().last(), Some(&chat));
    }

    #[test]
    fn test_joke_is_private() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        let (mut alice, alice_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());
        alice.handle_join("alice".to_string());
        let alice_before = alice_sent.sent().len();
        let bob_before = bob_sent.sent().len();

        bob.handle_message(r#"{"type":"chat","text":"/joke"}"#).unwrap();

        assert_eq!(alice_sent.sent().len(), alice_before);
        let bob_msgs = bob_sent.messages();
        assert_eq!(bob_msgs.len(), bob_before + 1);
        assert_eq!(
            bob_msgs.last(),
            Some(&json!({
                "type": "note",
                "text": "I just flew in from New York and boy are my arms tired!"
            }))
        );
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());
        let before = bob_sent.sent().len();

        bob.handle_command("weather");

        assert_eq!(bob_sent.sent().len(), before);
    }

    #[test]
    fn test_bad_type_is_an_error() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");

        let err = bob
            .handle_message(r#"{"type":"shout","text":"hi"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::BadMessage(_)));
        assert!(bob.handle_message("not json").is_err());
        assert!(bob_sent.sent().is_empty());
    }

    #[test]
    fn test_close_tells_remaining_members() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        let (mut alice, alice_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());
        alice.handle_join("alice".to_string());
        let room = alice.room().clone();
        let alice_id = alice.id();
        let alice_before = alice_sent.sent().len();

        alice.handle_close();

        assert!(!room.contains(alice_id));
        assert_eq!(room.member_count(), 1);
        assert_eq!(alice_sent.sent().len(), alice_before);
        assert_eq!(
            bob_sent.messages().last(),
            Some(&json!({"type": "note", "text": "alice left R."}))
        );
    }

    #[test]
    fn test_close_without_join_announces_null() {
        let registry = RoomRegistry::new();
        let (mut bob, bob_sent) = member(&registry, "R");
        let (lurker, lurker_sent) = member(&registry, "R");
        bob.handle_join("bob".to_string());
        let before = bob_sent.sent().len();

        lurker.handle_close();

        let bob_msgs = bob_sent.messages();
        assert_eq!(bob_msgs.len(), before + 1);
        assert_eq!(
            bob_msgs.last(),
            Some(&json!({"type": "note", "text": "null left R."}))
        );
        assert!(lurker_sent.sent().is_empty());
        assert_eq!(registry.get("R").member_count(), 1);
    }

    #[test]
    fn test_broken_member_does_not_blind_others() {
        let registry = RoomRegistry::new();
        let mut ghost = Member::new(Arc::new(Broken), "R", &registry);
        let (mut alice, alice_sent) = member(&registry, "R");
        ghost.handle_join("ghost".to_string());
        alice.handle_join("alice".to_string());

        ghost.handle_chat("boo".to_string());
        ghost.send("direct".to_string());

        assert_eq!(
            alice_sent.messages().last(),
            Some(&json!({"type": "chat", "name": "ghost", "text": "boo"}))
        );
    }

    #[test]
    fn test_members_in_other_rooms_hear_nothing() {
        let registry = RoomRegistry::new();
        let (mut bob, _) = member(&registry, "R");
        let (mut carol, carol_sent) = member(&registry, "S");
        carol.handle_join("carol".to_string());
        let before = carol_sent.sent().len();

        bob.handle_join("bob".to_string());
        bob.handle_chat("hi".to_string());

        assert_eq!(carol_sent.sent().len(), before);
    }
}
