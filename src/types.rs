//! Basic type definitions for the relay
//!
//! Provides newtype wrappers for type safety:
//! - `MemberId`: UUID-based identity of one connection's session

use uuid::Uuid;

/// Unique member identifier (newtype pattern)
///
/// A room's member set is keyed by this, so two sessions with the same
/// display name are still distinct members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Create a new random member ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
