//! Stat model.
//!
//! Derives a character's baseline stat block purely from its progression
//! (gear level and relic tier), independent of any mods.

use crate::player::Character;
use crate::stat_id::{StatId, OFFENSE, PROTECTION, SPEED};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Flat speed before gear and relic bonuses.
pub const BASE_SPEED: f64 = 100.0;
/// Speed gained per gear level.
pub const SPEED_PER_GEAR: f64 = 5.0;
/// Speed gained per relic tier.
pub const SPEED_PER_RELIC: f64 = 10.0;
/// Flat offense before gear bonuses.
pub const BASE_OFFENSE: f64 = 1000.0;
/// Offense gained per gear level.
pub const OFFENSE_PER_GEAR: f64 = 100.0;
/// Flat protection before gear bonuses.
pub const BASE_PROTECTION: f64 = 10000.0;
/// Protection gained per gear level.
pub const PROTECTION_PER_GEAR: f64 = 1000.0;

/// The three stats that take part in totals and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub speed: f64,
    pub offense: f64,
    pub protection: f64,
}

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock {
        speed: 0.0,
        offense: 0.0,
        protection: 0.0,
    };

    pub fn new(speed: f64, offense: f64, protection: f64) -> Self {
        Self {
            speed,
            offense,
            protection,
        }
    }

    /// Read a stat by id; `None` if the stat is not part of the block.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{StatBlock, StatId};
    ///
    /// let block = StatBlock::new(235.0, 2300.0, 23000.0);
    /// assert_eq!(block.get(&StatId::speed()), Some(235.0));
    /// assert_eq!(block.get(&StatId::new("potency")), None);
    /// ```
    pub fn get(&self, stat: &StatId) -> Option<f64> {
        match stat.as_str() {
            SPEED => Some(self.speed),
            OFFENSE => Some(self.offense),
            PROTECTION => Some(self.protection),
            _ => None,
        }
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(self, rhs: StatBlock) -> StatBlock {
        StatBlock {
            speed: self.speed + rhs.speed,
            offense: self.offense + rhs.offense,
            protection: self.protection + rhs.protection,
        }
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, rhs: StatBlock) {
        *self = *self + rhs;
    }
}

/// Compute a character's base stats from its progression.
///
/// - `speed = 100 + 5·gear_level + 10·relic_tier`
/// - `offense = 1000 + 100·gear_level`
/// - `protection = 10000 + 1000·gear_level`
///
/// # Examples
///
/// ```rust
/// use modstat::{derive_base_stats, Character, StatBlock};
///
/// let stats = derive_base_stats(&Character::new("ANAKINKNIGHT", 13, 7));
/// assert_eq!(stats, StatBlock::new(235.0, 2300.0, 23000.0));
/// ```
pub fn derive_base_stats(character: &Character) -> StatBlock {
    let gear = f64::from(character.gear_level);
    let relic = f64::from(character.relic_tier);

    StatBlock {
        speed: BASE_SPEED + SPEED_PER_GEAR * gear + SPEED_PER_RELIC * relic,
        offense: BASE_OFFENSE + OFFENSE_PER_GEAR * gear,
        protection: BASE_PROTECTION + PROTECTION_PER_GEAR * gear,
    }
}
