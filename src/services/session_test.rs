use super::*;

use crate::types::{Priority, Role};

fn story(title: &str) -> Story {
    Story::new(title, "", Priority::Medium)
}

fn member(name: &str) -> User {
    User::guest(name, Role::TeamMember).unwrap()
}

/// Session with a three-story backlog mirror and an active planning
/// session pointing at the first story.
fn seeded_session() -> (LiveSession, Vec<Uuid>) {
    let user = member("Alice");
    let mut live = LiveSession::new();

    let backlog = vec![story("First"), story("Second"), story("Third")];
    let ids: Vec<Uuid> = backlog.iter().map(|s| s.id).collect();

    let mut planning = PlanningSession::lobby(&user);
    planning.current_story_id = Some(ids[0]);

    live.set_current_user(user);
    live.set_current_session(planning);
    live.set_backlog(backlog);
    (live, ids)
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn new_session_is_empty() {
    let live = LiveSession::new();
    assert!(live.current_user().is_none());
    assert!(live.current_session().is_none());
    assert!(live.backlog().is_empty());
    assert!(!live.votes_revealed());
    assert!(live.current_story().is_none());
}

// =============================================================================
// add_vote / vote_for
// =============================================================================

#[test]
fn later_vote_overwrites_earlier_for_same_pair() {
    let (mut live, ids) = seeded_session();
    let voter = Uuid::new_v4();

    live.add_vote(voter, ids[0], 5);
    live.add_vote(voter, ids[0], 8);

    assert_eq!(live.vote_for(voter, ids[0]), Some(8));
    assert_eq!(live.votes_for_story(ids[0]).len(), 1);
}

#[test]
fn vote_for_unknown_pair_is_none() {
    let (live, ids) = seeded_session();
    assert!(live.vote_for(Uuid::new_v4(), ids[0]).is_none());
}

#[test]
fn votes_for_story_filters_by_story() {
    let (mut live, ids) = seeded_session();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    live.add_vote(alice, ids[0], 3);
    live.add_vote(bob, ids[0], 5);
    live.add_vote(alice, ids[1], 13);

    let mut round: Vec<_> = live.votes_for_story(ids[0]);
    round.sort();
    assert_eq!(round.len(), 2);
    assert!(round.contains(&(alice, 3)));
    assert!(round.contains(&(bob, 5)));
}

#[test]
fn deck_bound_is_not_enforced() {
    let (mut live, ids) = seeded_session();
    let voter = Uuid::new_v4();
    live.add_vote(voter, ids[0], 99);
    assert_eq!(live.vote_for(voter, ids[0]), Some(99));
}

// =============================================================================
// clear_votes
// =============================================================================

#[test]
fn clear_votes_is_scoped_to_one_story() {
    let (mut live, ids) = seeded_session();
    let voter = Uuid::new_v4();
    live.add_vote(voter, ids[0], 5);
    live.add_vote(voter, ids[1], 8);
    live.set_votes_revealed(true);

    live.clear_votes(ids[0]);

    assert!(live.vote_for(voter, ids[0]).is_none());
    assert_eq!(live.vote_for(voter, ids[1]), Some(8));
    assert!(!live.votes_revealed());
}

#[test]
fn clear_votes_hides_votes_even_when_none_recorded() {
    let (mut live, ids) = seeded_session();
    live.set_votes_revealed(true);
    live.clear_votes(ids[0]);
    assert!(!live.votes_revealed());
}

// =============================================================================
// move_to_next_story
// =============================================================================

#[test]
fn move_to_next_story_advances_pointer() {
    let (mut live, ids) = seeded_session();
    live.move_to_next_story(ids[0]);
    assert_eq!(
        live.current_session().unwrap().current_story_id,
        Some(ids[1])
    );
}

#[test]
fn move_to_next_story_at_end_unsets_pointer() {
    let (mut live, ids) = seeded_session();
    live.move_to_next_story(ids[2]);
    assert!(live.current_session().unwrap().current_story_id.is_none());
    assert!(live.current_story().is_none());
}

#[test]
fn move_to_next_story_discards_all_votes() {
    let (mut live, ids) = seeded_session();
    let voter = Uuid::new_v4();
    live.add_vote(voter, ids[0], 5);
    live.add_vote(voter, ids[2], 13);

    live.move_to_next_story(ids[0]);

    assert!(live.vote_for(voter, ids[0]).is_none());
    assert!(live.vote_for(voter, ids[2]).is_none());
    assert!(live.votes_for_story(ids[2]).is_empty());
}

#[test]
fn move_to_next_story_with_unknown_id_unsets_pointer() {
    let (mut live, _ids) = seeded_session();
    live.move_to_next_story(Uuid::new_v4());
    assert!(live.current_session().unwrap().current_story_id.is_none());
}

// =============================================================================
// backlog mirror
// =============================================================================

#[test]
fn update_story_replaces_matching_entry() {
    let (mut live, ids) = seeded_session();
    let mut edited = live.backlog()[1].clone();
    edited.title = "Second, revised".into();
    edited.estimated_points = Some(8);

    live.update_story(edited);

    assert_eq!(live.backlog()[1].title, "Second, revised");
    assert_eq!(live.backlog()[1].id, ids[1]);
    assert_eq!(live.backlog()[1].estimated_points, Some(8));
}

#[test]
fn update_story_with_unknown_id_is_noop() {
    let (mut live, _ids) = seeded_session();
    live.update_story(story("Not in backlog"));
    assert_eq!(live.backlog().len(), 3);
}

#[test]
fn add_story_appends() {
    let (mut live, _ids) = seeded_session();
    live.add_story(story("Fourth"));
    assert_eq!(live.backlog().len(), 4);
    assert_eq!(live.backlog()[3].title, "Fourth");
}

#[test]
fn delete_story_removes_entry() {
    let (mut live, ids) = seeded_session();
    live.delete_story(ids[1]);
    assert_eq!(live.backlog().len(), 2);
    assert!(live.backlog().iter().all(|s| s.id != ids[1]));
}

#[test]
fn deleting_current_story_leaves_dangling_pointer_read_as_absent() {
    let (mut live, ids) = seeded_session();
    live.delete_story(ids[0]);

    // Pointer still targets the deleted story; readers see no selection.
    assert_eq!(
        live.current_session().unwrap().current_story_id,
        Some(ids[0])
    );
    assert!(live.current_story().is_none());
}

#[test]
fn reorder_backlog_replaces_sequence() {
    let (mut live, ids) = seeded_session();
    let mut reversed: Vec<Story> = live.backlog().to_vec();
    reversed.reverse();

    live.reorder_backlog(reversed);

    let order: Vec<Uuid> = live.backlog().iter().map(|s| s.id).collect();
    assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
}

// =============================================================================
// reveal gate / reset
// =============================================================================

#[test]
fn reveal_gate_does_not_touch_votes() {
    let (mut live, ids) = seeded_session();
    let voter = Uuid::new_v4();
    live.add_vote(voter, ids[0], 5);

    live.set_votes_revealed(true);
    assert!(live.votes_revealed());
    assert_eq!(live.vote_for(voter, ids[0]), Some(5));

    live.set_votes_revealed(false);
    assert_eq!(live.vote_for(voter, ids[0]), Some(5));
}

#[test]
fn reset_returns_to_initial_empty_state() {
    let (mut live, ids) = seeded_session();
    live.add_vote(Uuid::new_v4(), ids[0], 5);
    live.set_votes_revealed(true);

    live.reset();

    assert!(live.current_user().is_none());
    assert!(live.current_session().is_none());
    assert!(live.backlog().is_empty());
    assert!(!live.votes_revealed());
    assert!(live.votes_for_story(ids[0]).is_empty());
}
