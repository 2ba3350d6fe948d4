//! Typed real-time event vocabulary.
//!
//! DESIGN
//! ======
//! A closed tagged-variant enum replaces the untyped `{type, payload}`
//! envelope a transport would carry. No transport exists in this core —
//! the enum and `LiveSession::apply_event` are the seam one would call.
//! Serialization uses an internal `type` tag so payloads stay strongly
//! typed end to end.

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Story, User};

/// One room-scoped event, as a future transport would deliver it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RealtimeEvent {
    UserJoined { user: User },
    UserLeft { user_id: Uuid },
    VoteSubmitted { user_id: Uuid, story_id: Uuid, points: u32 },
    VotesRevealed { story_id: Uuid },
    StoryStarted { story_id: Uuid },
    StoryCompleted { story_id: Uuid },
    BacklogUpdated { backlog: Vec<Story> },
}
