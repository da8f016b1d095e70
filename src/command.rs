//! Chat commands
//!
//! A command is triggered by a literal prefix in chat text and answered
//! privately to the sender with a canned note.

/// Command identifier for the joke responder
pub const JOKE: &str = "joke";

/// Trigger prefix → command identifier
const TRIGGERS: &[(&str, &str)] = &[("/jok", JOKE)];

/// Return the command identifier whose trigger `text` starts with
pub fn trigger(text: &str) -> Option<&'static str> {
    TRIGGERS
        .iter()
        .find(|(prefix, _)| text.starts_with(prefix))
        .map(|(_, command)| *command)
}

/// Canned response text for a command, `None` if the command is unknown
pub fn respond(command: &str) -> Option<&'static str> {
    match command {
        JOKE => Some(joke()),
        _ => None,
    }
}

fn joke() -> &'static str {
    "I just flew in from New York and boy are my arms tired!"
}
