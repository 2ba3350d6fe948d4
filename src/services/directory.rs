//! Room directory — durable registry of rooms and membership.
//!
//! DESIGN
//! ======
//! The directory owns the full room list and the "current room" marker.
//! Every mutating operation rewrites the whole snapshot through the
//! `SnapshotStore` synchronously before returning; there is no partial
//! write or transaction boundary. Lookups are linear and absence is a
//! normal outcome, not an error.
//!
//! ERROR HANDLING
//! ==============
//! Mutations are total functions over their inputs: a failed snapshot save
//! is logged and the in-memory state stays authoritative for the rest of
//! the visit. `join_room` returns `None` for an unknown code and leaves
//! the directory untouched. Mutations naming an unknown room id are
//! silent no-ops.

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::codes::{generate_invite_code, normalize_invite_code};
use crate::storage::{DirectorySnapshot, SnapshotStore};
use crate::types::{PlanningSession, Room, Story, User, now_ms};

/// Partial scalar update for [`RoomDirectory::update_room`]. Fields left
/// `None` are unchanged. Backlog and session have their own whole-field
/// replacement operations.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    pub name: Option<String>,
}

/// Durable registry of all rooms; identity and membership management.
pub struct RoomDirectory {
    rooms: Vec<Room>,
    current_room_id: Option<Uuid>,
    store: Box<dyn SnapshotStore>,
}

impl RoomDirectory {
    /// Open the directory, hydrating from the store's last snapshot. A
    /// missing or unreadable snapshot degrades to an empty directory.
    pub fn open(store: Box<dyn SnapshotStore>) -> Self {
        let snapshot = match store.load() {
            Ok(snapshot) => snapshot.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "snapshot load failed; starting empty");
                DirectorySnapshot::default()
            }
        };

        info!(rooms = snapshot.rooms.len(), "room directory opened");
        Self {
            rooms: snapshot.rooms,
            current_room_id: snapshot.current_room_id,
            store,
        }
    }

    // =========================================================================
    // CREATE / JOIN
    // =========================================================================

    /// Create a room owned by `owner`: fresh id, collision-checked invite
    /// code, lobby planning session with the owner as sole participant.
    /// The new room is appended, marked current, and persisted.
    pub fn create_room(&mut self, name: impl Into<String>, owner: User) -> Room {
        let id = Uuid::new_v4();
        let invite_code = self.unused_invite_code();
        let ts = now_ms();

        let room = Room {
            id,
            name: name.into(),
            invite_code,
            owner_id: owner.id,
            planning_session: PlanningSession::lobby(&owner),
            backlog: Vec::new(),
            participants: vec![owner],
            created_at: ts,
            updated_at: ts,
        };

        self.rooms.push(room.clone());
        self.current_room_id = Some(id);
        self.persist();

        info!(room_id = %id, code = %room.invite_code, "room created");
        room
    }

    /// Join a room by invite code. Returns `None` when the code resolves
    /// to nothing, leaving the directory untouched. Re-joining with a user
    /// id already on the roster is idempotent. The joined room becomes the
    /// current room.
    pub fn join_room(&mut self, code: &str, user: User) -> Option<Room> {
        let code = normalize_invite_code(code);
        let room_id = self.rooms.iter().find(|r| r.invite_code == code)?.id;

        self.add_participant(room_id, user);
        self.current_room_id = Some(room_id);
        self.persist();

        self.get_room_by_id(room_id).cloned()
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// Linear lookup by room id.
    #[must_use]
    pub fn get_room_by_id(&self, id: Uuid) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Case-insensitive linear lookup by invite code.
    #[must_use]
    pub fn get_room_by_invite_code(&self, code: &str) -> Option<&Room> {
        let code = normalize_invite_code(code);
        self.rooms.iter().find(|r| r.invite_code == code)
    }

    /// All rooms, in creation order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The room marked active for this visit, if any.
    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        let id = self.current_room_id?;
        self.get_room_by_id(id)
    }

    /// Mark a room active (or none).
    pub fn set_current_room(&mut self, room_id: Option<Uuid>) {
        self.current_room_id = room_id;
        self.persist();
    }

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================

    /// Add `user` to the roster and the nested session's participant list.
    /// A user id already on the roster is a no-op.
    pub fn add_participant(&mut self, room_id: Uuid, user: User) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };
        if room.participants.iter().any(|p| p.id == user.id) {
            return;
        }

        let user_id = user.id;
        room.planning_session.participants.push(user.clone());
        room.participants.push(user);
        room.updated_at = now_ms();

        info!(%room_id, %user_id, "participant joined");
        self.persist();
    }

    /// Remove a user from the roster and the session's participant list.
    /// The owner cannot be removed: the roster always contains the owner.
    pub fn remove_participant(&mut self, room_id: Uuid, user_id: Uuid) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };
        if user_id == room.owner_id {
            return;
        }

        room.participants.retain(|p| p.id != user_id);
        room.planning_session.participants.retain(|p| p.id != user_id);
        room.updated_at = now_ms();

        info!(%room_id, %user_id, "participant removed");
        self.persist();
    }

    // =========================================================================
    // UPDATES
    // =========================================================================

    /// Apply a partial scalar update to a room.
    pub fn update_room(&mut self, room_id: Uuid, patch: RoomPatch) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };

        if let Some(name) = patch.name {
            room.name = name;
        }
        room.updated_at = now_ms();
        self.persist();
    }

    /// Replace a room's backlog wholesale. Callers supply the complete new
    /// sequence; there is no merge or diff.
    pub fn update_backlog(&mut self, room_id: Uuid, backlog: Vec<Story>) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };

        room.backlog = backlog;
        room.updated_at = now_ms();
        self.persist();
    }

    /// Replace a room's planning session wholesale.
    pub fn update_session(&mut self, room_id: Uuid, session: PlanningSession) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };

        room.planning_session = session;
        room.updated_at = now_ms();
        self.persist();
    }

    /// Point the room's session at a story. The caller is responsible for
    /// resetting any live vote state for the new round.
    pub fn select_story(&mut self, room_id: Uuid, story_id: Uuid) {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) else {
            return;
        };

        room.planning_session.current_story_id = Some(story_id);
        room.updated_at = now_ms();
        self.persist();
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Mint an invite code no existing room uses. Collisions are rare at
    /// this alphabet size but possible, so regenerate until free.
    fn unused_invite_code(&self) -> String {
        loop {
            let code = generate_invite_code();
            if !self.rooms.iter().any(|r| r.invite_code == code) {
                return code;
            }
        }
    }

    /// Rewrite the whole snapshot. Failures are logged; the in-memory
    /// state stays authoritative for the rest of the visit.
    fn persist(&self) {
        let snapshot = DirectorySnapshot {
            rooms: self.rooms.clone(),
            current_room_id: self.current_room_id,
        };
        if let Err(e) = self.store.save(&snapshot) {
            error!(error = %e, rooms = self.rooms.len(), "snapshot save failed");
        }
    }
}
