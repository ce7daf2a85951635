//! Stat sources module.
//!
//! Sources contribute values to a stat block. Contributions from several
//! sources are summed (additive), which is how a character's base stats and
//! the mods chosen for it combine into final stats. Sources are stateless
//! and deterministic.

use crate::mods::Mod;
use crate::player::Character;
use crate::stat_id::StatId;
use crate::stats::{derive_base_stats, StatBlock};

/// Trait for anything that adds to a character's tracked stats.
///
/// # Examples
///
/// ```rust
/// use modstat::{Character, StatBlock, StatSource};
///
/// let anakin = Character::new("ANAKINKNIGHT", 13, 7);
/// assert_eq!(anakin.contribution(), StatBlock::new(235.0, 2300.0, 23000.0));
/// assert_eq!(anakin.label(), "Base");
/// ```
pub trait StatSource {
    /// The amounts this source adds to speed, offense and protection.
    fn contribution(&self) -> StatBlock;

    /// Human-readable label used in stat breakdowns.
    fn label(&self) -> String;

    /// Contribution to a single stat; 0.0 for stats outside the block.
    fn value_of(&self, stat: &StatId) -> f64 {
        self.contribution().get(stat).unwrap_or(0.0)
    }
}

/// A character contributes its progression-derived base stats.
impl StatSource for Character {
    fn contribution(&self) -> StatBlock {
        derive_base_stats(self)
    }

    fn label(&self) -> String {
        String::from("Base")
    }
}

/// A precomputed block, labelled as base stats.
impl StatSource for StatBlock {
    fn contribution(&self) -> StatBlock {
        *self
    }

    fn label(&self) -> String {
        String::from("Base")
    }
}

/// A mod contributes its flat speed, offense and protection secondaries.
/// Percent and other secondaries are carried on the record but not summed.
impl StatSource for Mod {
    fn contribution(&self) -> StatBlock {
        StatBlock {
            speed: self.secondary.speed,
            offense: self.secondary.offense,
            protection: self.secondary.protection,
        }
    }

    fn label(&self) -> String {
        format!("Mod {} (slot {})", self.id, self.slot)
    }
}
