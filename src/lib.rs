//! Room and session state core for `ScrumPlan`, a planning-poker tool.
//!
//! ARCHITECTURE
//! ============
//! Two state-owning services form the whole core. [`RoomDirectory`] is the
//! durable registry of rooms — identity, invite codes, rosters, backlogs —
//! snapshotted wholesale through a [`SnapshotStore`] on every mutation.
//! [`LiveSession`] is the transient working state of the currently open
//! room: the active user, the in-memory vote map, and the reveal gate. It
//! is recreated empty on every application load.
//!
//! A view layer calls both services directly in response to user actions;
//! there is no intermediating queue or network boundary, and no operation
//! suspends or blocks. The directory is the source of truth for backlog
//! and session metadata; the live session is a working cache for the
//! active voting round, and callers propagate backlog edits between the
//! two themselves.

pub mod codes;
pub mod consts;
pub mod events;
pub mod services;
pub mod storage;
pub mod types;

pub use events::RealtimeEvent;
pub use services::directory::{RoomDirectory, RoomPatch};
pub use services::session::LiveSession;
pub use storage::{DirectorySnapshot, FileStore, MemoryStore, SnapshotStore, StorageError};
pub use types::{
    PlanningSession, Priority, Role, Room, SessionStatus, Story, StoryStatus, User, Vote,
};
