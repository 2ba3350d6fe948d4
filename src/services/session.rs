//! Live session state — ephemeral working state for the open room's
//! voting round.
//!
//! DESIGN
//! ======
//! Nothing here is persisted; the container is recreated empty on every
//! application load. Votes are keyed by `(participant id, story id)` so
//! ids can never collide with a separator character. The backlog is a
//! local mirror of the room's backlog: callers propagate edits to the
//! room directory themselves — no automatic synchronization exists
//! between the two containers.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::collections::HashMap;

use uuid::Uuid;

use crate::events::RealtimeEvent;
use crate::types::{PlanningSession, Story, StoryStatus, User, now_ms};

/// Composite vote key: (participant id, story id).
pub type VoteKey = (Uuid, Uuid);

/// Transient per-visit state for the currently open room.
#[derive(Debug, Default)]
pub struct LiveSession {
    current_user: Option<User>,
    current_session: Option<PlanningSession>,
    backlog: Vec<Story>,
    votes: HashMap<VoteKey, u32>,
    votes_revealed: bool,
}

impl LiveSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn current_session(&self) -> Option<&PlanningSession> {
        self.current_session.as_ref()
    }

    #[must_use]
    pub fn backlog(&self) -> &[Story] {
        &self.backlog
    }

    #[must_use]
    pub fn votes_revealed(&self) -> bool {
        self.votes_revealed
    }

    /// The story the session points at, if it still exists in the mirror.
    /// Deleting the pointed-at story leaves the pointer dangling; readers
    /// see "no story selected".
    #[must_use]
    pub fn current_story(&self) -> Option<&Story> {
        let id = self.current_session.as_ref()?.current_story_id?;
        self.backlog.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn vote_for(&self, user_id: Uuid, story_id: Uuid) -> Option<u32> {
        self.votes.get(&(user_id, story_id)).copied()
    }

    /// All recorded votes for one story, as (participant, points) pairs.
    #[must_use]
    pub fn votes_for_story(&self, story_id: Uuid) -> Vec<(Uuid, u32)> {
        self.votes
            .iter()
            .filter(|((_, sid), _)| *sid == story_id)
            .map(|((uid, _), points)| (*uid, *points))
            .collect()
    }

    // =========================================================================
    // REPLACEMENT SETTERS
    // =========================================================================

    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    pub fn set_current_session(&mut self, session: PlanningSession) {
        self.current_session = Some(session);
    }

    pub fn set_backlog(&mut self, stories: Vec<Story>) {
        self.backlog = stories;
    }

    // =========================================================================
    // VOTING
    // =========================================================================

    /// Record `points` for `(user, story)`. A later vote for the same pair
    /// overwrites the earlier one. The estimation deck is a UI contract
    /// and is not enforced here.
    pub fn add_vote(&mut self, user_id: Uuid, story_id: Uuid, points: u32) {
        self.votes.insert((user_id, story_id), points);
    }

    /// Display gate for the reveal panel; stored votes are untouched.
    pub fn set_votes_revealed(&mut self, revealed: bool) {
        self.votes_revealed = revealed;
    }

    /// Drop every vote cast for `story_id`, regardless of participant, and
    /// hide votes again.
    pub fn clear_votes(&mut self, story_id: Uuid) {
        self.votes.retain(|(_, sid), _| *sid != story_id);
        self.votes_revealed = false;
    }

    /// Advance the session pointer to the story after `story_id` in the
    /// backlog mirror, or unset it at the end (no wraparound). Discards
    /// **all** votes, not just the previous story's.
    pub fn move_to_next_story(&mut self, story_id: Uuid) {
        let next_id = self
            .backlog
            .iter()
            .position(|s| s.id == story_id)
            .and_then(|idx| self.backlog.get(idx + 1))
            .map(|s| s.id);

        if let Some(session) = self.current_session.as_mut() {
            session.current_story_id = next_id;
        }
        self.votes.clear();
    }

    // =========================================================================
    // BACKLOG MIRROR
    // =========================================================================

    /// Replace a story in place, matching on id. An unknown id is a no-op.
    pub fn update_story(&mut self, story: Story) {
        if let Some(slot) = self.backlog.iter_mut().find(|s| s.id == story.id) {
            *slot = story;
        }
    }

    pub fn add_story(&mut self, story: Story) {
        self.backlog.push(story);
    }

    pub fn delete_story(&mut self, story_id: Uuid) {
        self.backlog.retain(|s| s.id != story_id);
    }

    /// Replace the mirror with a reordered sequence.
    pub fn reorder_backlog(&mut self, stories: Vec<Story>) {
        self.backlog = stories;
    }

    /// Clear all fields back to their initial empty values. Used on
    /// session teardown.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // EVENT DISPATCH
    // =========================================================================

    /// Apply one real-time event to the live state — the single typed
    /// handler switch a transport would feed.
    pub fn apply_event(&mut self, event: RealtimeEvent) {
        match event {
            RealtimeEvent::UserJoined { user } => {
                if let Some(session) = self.current_session.as_mut() {
                    if !session.participants.iter().any(|p| p.id == user.id) {
                        session.participants.push(user);
                    }
                }
            }
            RealtimeEvent::UserLeft { user_id } => {
                if let Some(session) = self.current_session.as_mut() {
                    session.participants.retain(|p| p.id != user_id);
                }
            }
            RealtimeEvent::VoteSubmitted { user_id, story_id, points } => {
                self.add_vote(user_id, story_id, points);
            }
            RealtimeEvent::VotesRevealed { .. } => {
                self.set_votes_revealed(true);
            }
            RealtimeEvent::StoryStarted { story_id } => {
                if let Some(session) = self.current_session.as_mut() {
                    session.current_story_id = Some(story_id);
                }
                self.votes_revealed = false;
            }
            RealtimeEvent::StoryCompleted { story_id } => {
                if let Some(story) = self.backlog.iter_mut().find(|s| s.id == story_id) {
                    story.status = StoryStatus::Done;
                    story.updated_at = now_ms();
                }
            }
            RealtimeEvent::BacklogUpdated { backlog } => {
                self.set_backlog(backlog);
            }
        }
    }
}
