//! Error types for roster ingestion, optimization and comparison.
//!
//! All errors the crate can surface are represented by the `RosterError`
//! enum. Empty collections are never errors: allocation and comparison
//! degrade to zero-valued results instead.

use crate::mods::ModSlot;
use thiserror::Error;

/// Format an entity lookup key as a readable string.
fn format_lookup(entity: &str, id: &str) -> String {
    if id.is_empty() {
        return format!("{} (empty id)", entity);
    }
    format!("{} '{}'", entity, id)
}

/// Errors that can occur while reading snapshots or running the optimizer.
///
/// # Examples
///
/// ```rust
/// use modstat::RosterError;
///
/// let err = RosterError::NotFound { entity: "character", id: "ANAKINKNIGHT".into() };
/// assert_eq!(err.to_string(), "Not found: character 'ANAKINKNIGHT'");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// A player, character or loadout is absent from the snapshot store.
    #[error("Not found: {}", format_lookup(.entity, .id))]
    NotFound { entity: &'static str, id: String },

    /// An ally code is not exactly nine digits once separators are removed.
    #[error("Invalid ally code: '{0}' (9 digits required)")]
    InvalidAllyCode(String),

    /// A slot number outside 1..=6.
    #[error("Invalid mod slot: {0} (expected 1-6)")]
    InvalidSlot(u8),

    /// Weights could not be read as a map of stat name to finite number.
    ///
    /// Only the strict parser reports this; the lenient path falls back
    /// to the default weight vector.
    #[error("Invalid stat weights: {0}")]
    InvalidWeights(String),

    /// A mod record breaks one of its own invariants.
    #[error("Invalid mod {id}: {reason}")]
    InvalidMod { id: String, reason: String },

    /// Two equipped mods claim the same slot on one character.
    #[error("Duplicate equipped mod for character {character} in slot {slot}")]
    DuplicateSlot { character: String, slot: ModSlot },

    /// A roster lists the same character twice.
    #[error("Duplicate character {id} in roster")]
    DuplicateCharacter { id: String },

    /// Two mod records share an id.
    #[error("Duplicate mod id {id}")]
    DuplicateMod { id: String },

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("snapshot store lock was poisoned")]
    LockPoisoned,

    /// A payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RosterError::NotFound {
            entity: "player",
            id: "123456789".into(),
        };
        assert!(err.to_string().contains("player"));
        assert!(err.to_string().contains("123456789"));
    }

    #[test]
    fn test_not_found_empty_id_display() {
        let err = RosterError::NotFound {
            entity: "character",
            id: String::new(),
        };
        assert_eq!(err.to_string(), "Not found: character (empty id)");
    }

    #[test]
    fn test_duplicate_slot_display() {
        let err = RosterError::DuplicateSlot {
            character: "GRANDMASTERYODA".into(),
            slot: ModSlot::Circle,
        };
        let display = err.to_string();
        assert!(display.contains("GRANDMASTERYODA"));
        assert!(display.contains("slot 5"));
    }

    #[test]
    fn test_duplicate_record_display() {
        let character = RosterError::DuplicateCharacter { id: "HERO".into() };
        assert_eq!(character.to_string(), "Duplicate character HERO in roster");
        let m = RosterError::DuplicateMod { id: "m1".into() };
        assert_eq!(m.to_string(), "Duplicate mod id m1");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: RosterError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
