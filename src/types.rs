//! Domain model shared by the room directory and the live session.
//!
//! DESIGN
//! ======
//! Plain serde structs with public fields; all invariants that need
//! guarding are enforced by the services that own the data. A `Story`
//! belongs to exactly one room's backlog. The planning session nested in a
//! room mirrors the room's roster. Timestamps are milliseconds since the
//! Unix epoch, stamped at construction.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time as milliseconds since Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// USER
// =============================================================================

/// Participant role. Not access-controlled: the owner may toggle roles
/// locally for demo purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProductOwner,
    TeamMember,
}

impl Role {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::ProductOwner => "Product Owner",
            Role::TeamMember => "Team Member",
        }
    }
}

/// A participant. Created at join/create time; removed only by leaving the
/// roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Avatar image URL, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub email: String,
    pub role: Role,
    pub is_online: bool,
}

impl User {
    /// Build a participant from a display name typed into the join/create
    /// form. Returns `None` for a blank name (the form surfaces an inline
    /// message and attempts no mutation). There is no sign-in, so the email
    /// is a placeholder derived from the name.
    #[must_use]
    pub fn guest(name: &str, role: Role) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let email = format!(
            "{}@example.com",
            name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".")
        );

        Some(Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            avatar: None,
            email,
            role,
            is_online: true,
        })
    }
}

// =============================================================================
// STORY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Where a story sits in the planning flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryStatus {
    Backlog,
    InPlanning,
    Planned,
    InProgress,
    Done,
}

impl StoryStatus {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StoryStatus::Backlog => "Backlog",
            StoryStatus::InPlanning => "Planning",
            StoryStatus::Planned => "Planned",
            StoryStatus::InProgress => "In Progress",
            StoryStatus::Done => "Done",
        }
    }
}

/// A unit of work to be estimated. Lives in exactly one room's backlog;
/// the id is generated at creation and preserved across edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    pub status: StoryStatus,
    /// Free-form labels, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Story {
    /// Create an unestimated backlog story with a fresh id and timestamps.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        let ts = now_ms();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            priority,
            estimated_points: None,
            assigned_to: None,
            status: StoryStatus::Backlog,
            tags: Vec::new(),
            created_at: ts,
            updated_at: ts,
        }
    }
}

// =============================================================================
// PLANNING SESSION
// =============================================================================

/// A durable vote record, as carried by `PlanningSession.votes`. The live
/// vote map for the active round is held by `LiveSession` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: Uuid,
    pub story_id: Uuid,
    pub points: u32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Lobby,
    Planning,
    Completed,
}

/// The active voting-round metadata nested in a room. One exists per room,
/// created alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningSession {
    pub id: Uuid,
    pub sprint_goal: String,
    /// References a story in the owning room's backlog. Deleting that
    /// story leaves this dangling; readers treat it as "no story selected".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_story_id: Option<Uuid>,
    pub status: SessionStatus,
    pub participants: Vec<User>,
    pub votes: Vec<Vote>,
    pub created_by: Uuid,
    pub created_at: i64,
}

impl PlanningSession {
    /// Fresh lobby session with `owner` as sole participant.
    #[must_use]
    pub fn lobby(owner: &User) -> Self {
        Self {
            id: Uuid::new_v4(),
            sprint_goal: String::new(),
            current_story_id: None,
            status: SessionStatus::Lobby,
            participants: vec![owner.clone()],
            votes: Vec::new(),
            created_by: owner.id,
            created_at: now_ms(),
        }
    }
}

// =============================================================================
// ROOM
// =============================================================================

/// A planning session's container: backlog, participants, invite code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    /// Six uppercase characters; stored and compared case-insensitively.
    pub invite_code: String,
    pub owner_id: Uuid,
    pub planning_session: PlanningSession,
    /// Ordered backlog. Story ids are unique within it.
    pub backlog: Vec<Story>,
    /// Roster in insertion order. Always contains the owner.
    pub participants: Vec<User>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Room {
    /// The story the session points at, if it still exists in the backlog.
    #[must_use]
    pub fn current_story(&self) -> Option<&Story> {
        let id = self.planning_session.current_story_id?;
        self.backlog.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }
}
