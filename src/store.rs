//! Snapshot store contract and an in-memory implementation.
//!
//! The optimizer and comparison code read players, characters and mods
//! through [`SnapshotStore`]; the store is passed in explicitly on every
//! call and the core never keeps a handle to it.

use crate::error::{Result, RosterError};
use crate::loadout::{Loadout, NewLoadout};
use crate::mods::{Mod, ModSlot};
use crate::player::{AllyCode, Character, Player};
use crate::snapshot::PlayerSnapshot;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Which mods to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModFilter {
    #[default]
    All,
    Equipped,
    Unequipped,
}

impl ModFilter {
    pub fn matches(self, m: &Mod) -> bool {
        match self {
            ModFilter::All => true,
            ModFilter::Equipped => m.equipped,
            ModFilter::Unequipped => !m.equipped,
        }
    }
}

/// Read/write access to the latest snapshot of each player.
///
/// Every read returns owned, point-in-time data.
pub trait SnapshotStore: Send + Sync {
    /// Load a player summary.
    fn player(&self, ally_code: &AllyCode) -> Result<Option<Player>>;

    /// Load one character of a player's roster.
    fn character(&self, ally_code: &AllyCode, character_id: &str) -> Result<Option<Character>>;

    /// All characters of a player, in snapshot order. Empty for unknown players.
    fn characters(&self, ally_code: &AllyCode) -> Result<Vec<Character>>;

    /// A player's mods, in snapshot order.
    fn mods(&self, ally_code: &AllyCode, filter: ModFilter) -> Result<Vec<Mod>>;

    /// Upsert the player and replace its characters and mods wholesale.
    fn replace_snapshot(&self, snapshot: PlayerSnapshot) -> Result<()>;

    /// Append a loadout, returning it with its assigned id.
    fn save_loadout(&self, loadout: NewLoadout) -> Result<Loadout>;

    /// A player's loadouts, newest first.
    fn loadouts(&self, ally_code: &AllyCode) -> Result<Vec<Loadout>>;

    /// Delete a loadout by id.
    fn delete_loadout(&self, id: u64) -> Result<()>;

    /// Like [`character`](Self::character) but absence is an error.
    fn require_character(&self, ally_code: &AllyCode, character_id: &str) -> Result<Character> {
        self.character(ally_code, character_id)?
            .ok_or_else(|| RosterError::NotFound {
                entity: "character",
                id: character_id.to_string(),
            })
    }

    /// Mods the optimizer may hand to `character_id`: the player's free
    /// mods plus those already on that character.
    fn candidate_mods(&self, ally_code: &AllyCode, character_id: &str) -> Result<Vec<Mod>> {
        Ok(self
            .mods(ally_code, ModFilter::All)?
            .into_iter()
            .filter(|m| m.is_candidate_for(character_id))
            .collect())
    }
}

#[derive(Default)]
struct Inner {
    snapshots: HashMap<AllyCode, PlayerSnapshot>,
    loadouts: Vec<Loadout>,
    next_loadout_id: u64,
}

/// In-memory [`SnapshotStore`] for tests, demos and local runs.
///
/// A single lock guards all players so each read sees one consistent
/// snapshot.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    inner: RwLock<Inner>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> Result<T> {
        let inner = self.inner.read().map_err(|_| RosterError::LockPoisoned)?;
        Ok(f(&inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Inner) -> Result<T>) -> Result<T> {
        let mut inner = self.inner.write().map_err(|_| RosterError::LockPoisoned)?;
        f(&mut inner)
    }
}

/// Reject snapshots that repeat a character or mod id, or whose mods break
/// the per-record or per-slot invariants.
fn validate_snapshot(snapshot: &PlayerSnapshot) -> Result<()> {
    let owner = &snapshot.player.ally_code;

    let mut base_ids: HashSet<&str> = HashSet::new();
    for character in &snapshot.characters {
        if !base_ids.insert(character.base_id.as_str()) {
            return Err(RosterError::DuplicateCharacter {
                id: character.base_id.clone(),
            });
        }
    }

    let mut mod_ids: HashSet<&str> = HashSet::new();
    let mut occupied: HashSet<(&str, ModSlot)> = HashSet::new();
    for m in &snapshot.mods {
        m.validate()?;
        if !mod_ids.insert(m.id.as_str()) {
            return Err(RosterError::DuplicateMod { id: m.id.clone() });
        }
        if &m.ally_code != owner {
            return Err(RosterError::InvalidMod {
                id: m.id.clone(),
                reason: format!("owned by {} in snapshot of {}", m.ally_code, owner),
            });
        }
        if let Some(character) = m.character_id.as_deref() {
            if !occupied.insert((character, m.slot)) {
                return Err(RosterError::DuplicateSlot {
                    character: character.to_string(),
                    slot: m.slot,
                });
            }
        }
    }
    Ok(())
}

impl SnapshotStore for InMemorySnapshotStore {
    fn player(&self, ally_code: &AllyCode) -> Result<Option<Player>> {
        self.read(|inner| inner.snapshots.get(ally_code).map(|s| s.player.clone()))
    }

    fn character(&self, ally_code: &AllyCode, character_id: &str) -> Result<Option<Character>> {
        self.read(|inner| {
            inner.snapshots.get(ally_code).and_then(|s| {
                s.characters
                    .iter()
                    .find(|c| c.base_id == character_id)
                    .cloned()
            })
        })
    }

    fn characters(&self, ally_code: &AllyCode) -> Result<Vec<Character>> {
        self.read(|inner| {
            inner
                .snapshots
                .get(ally_code)
                .map(|s| s.characters.clone())
                .unwrap_or_default()
        })
    }

    fn mods(&self, ally_code: &AllyCode, filter: ModFilter) -> Result<Vec<Mod>> {
        self.read(|inner| {
            inner
                .snapshots
                .get(ally_code)
                .map(|s| s.mods.iter().filter(|m| filter.matches(m)).cloned().collect())
                .unwrap_or_default()
        })
    }

    fn replace_snapshot(&self, snapshot: PlayerSnapshot) -> Result<()> {
        validate_snapshot(&snapshot)?;
        self.write(|inner| {
            tracing::debug!(
                ally_code = %snapshot.player.ally_code,
                characters = snapshot.characters.len(),
                mods = snapshot.mods.len(),
                "replacing snapshot"
            );
            inner
                .snapshots
                .insert(snapshot.player.ally_code.clone(), snapshot);
            Ok(())
        })
    }

    fn save_loadout(&self, loadout: NewLoadout) -> Result<Loadout> {
        self.write(|inner| {
            inner.next_loadout_id += 1;
            let saved = loadout.into_loadout(inner.next_loadout_id, Utc::now());
            tracing::debug!(
                id = saved.id,
                name = %saved.name,
                ally_code = %saved.ally_code,
                "saved loadout"
            );
            inner.loadouts.push(saved.clone());
            Ok(saved)
        })
    }

    fn loadouts(&self, ally_code: &AllyCode) -> Result<Vec<Loadout>> {
        // Ids grow with time, so reverse insertion order is newest first.
        self.read(|inner| {
            inner
                .loadouts
                .iter()
                .rev()
                .filter(|l| &l.ally_code == ally_code)
                .cloned()
                .collect()
        })
    }

    fn delete_loadout(&self, id: u64) -> Result<()> {
        self.write(|inner| {
            let before = inner.loadouts.len();
            inner.loadouts.retain(|l| l.id != id);
            if inner.loadouts.len() == before {
                return Err(RosterError::NotFound {
                    entity: "loadout",
                    id: id.to_string(),
                });
            }
            tracing::debug!(id, "deleted loadout");
            Ok(())
        })
    }
}
