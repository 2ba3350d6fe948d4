//! Invite-code generation, normalization, and share links.
//!
//! Codes are six characters drawn uniformly from `[A-Z0-9]`. Uniqueness is
//! enforced where codes are minted (`RoomDirectory::create_room` regenerates
//! on collision), not here.

#[cfg(test)]
#[path = "codes_test.rs"]
mod tests;

use rand::Rng;

/// Invite codes are always this long.
pub const INVITE_CODE_LEN: usize = 6;

const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random invite code.
#[must_use]
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Canonical form used for storage and lookup: trimmed, ASCII-uppercased.
/// Lookups are case-insensitive as a consequence.
#[must_use]
pub fn normalize_invite_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Shareable join link for an invite code: `<origin>/join/<CODE>`.
#[must_use]
pub fn invite_link(origin: &str, code: &str) -> String {
    format!(
        "{}/join/{}",
        origin.trim_end_matches('/'),
        normalize_invite_code(code)
    )
}
