//! Mod records.
//!
//! A `Mod` is an equippable item occupying one of six `ModSlot`s. It has a
//! primary stat and a fixed set of named secondary stats; only the flat
//! speed, offense and protection secondaries take part in stat totals.

use crate::error::{Result, RosterError};
use crate::player::AllyCode;
use crate::stat_id::{OFFENSE, PROTECTION, SPEED};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six equipment positions, numbered 1 through 6.
///
/// Serialized as its number.
///
/// # Examples
///
/// ```rust
/// use modstat::ModSlot;
///
/// assert_eq!(ModSlot::try_from(3u8).unwrap(), ModSlot::Diamond);
/// assert_eq!(ModSlot::Cross.number(), 6);
/// assert!(ModSlot::try_from(7u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ModSlot {
    Square,
    Arrow,
    Diamond,
    Triangle,
    Circle,
    Cross,
}

impl ModSlot {
    /// All slots in number order.
    pub const ALL: [ModSlot; 6] = [
        ModSlot::Square,
        ModSlot::Arrow,
        ModSlot::Diamond,
        ModSlot::Triangle,
        ModSlot::Circle,
        ModSlot::Cross,
    ];

    /// Slot number, 1 through 6.
    pub fn number(self) -> u8 {
        match self {
            ModSlot::Square => 1,
            ModSlot::Arrow => 2,
            ModSlot::Diamond => 3,
            ModSlot::Triangle => 4,
            ModSlot::Circle => 5,
            ModSlot::Cross => 6,
        }
    }

    /// Zero-based position, handy for per-slot arrays.
    pub fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    /// Shape name of the slot.
    pub fn shape(self) -> &'static str {
        match self {
            ModSlot::Square => "square",
            ModSlot::Arrow => "arrow",
            ModSlot::Diamond => "diamond",
            ModSlot::Triangle => "triangle",
            ModSlot::Circle => "circle",
            ModSlot::Cross => "cross",
        }
    }
}

impl TryFrom<u8> for ModSlot {
    type Error = RosterError;

    fn try_from(number: u8) -> Result<Self> {
        match number {
            1..=6 => Ok(Self::ALL[usize::from(number - 1)]),
            other => Err(RosterError::InvalidSlot(other)),
        }
    }
}

impl From<ModSlot> for u8 {
    fn from(slot: ModSlot) -> u8 {
        slot.number()
    }
}

impl fmt::Display for ModSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// The primary stat of a mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryStat {
    pub stat_type: String,
    pub value: f64,
}

impl Default for PrimaryStat {
    fn default() -> Self {
        Self {
            stat_type: String::from("Unknown"),
            value: 0.0,
        }
    }
}

/// Named secondary stat values. Every field defaults to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryStats {
    pub speed: f64,
    pub offense: f64,
    pub offense_percent: f64,
    pub protection: f64,
    pub protection_percent: f64,
    pub health: f64,
    pub health_percent: f64,
    pub defense: f64,
    pub defense_percent: f64,
    pub potency: f64,
    pub tenacity: f64,
    pub critical_chance: f64,
}

impl SecondaryStats {
    /// Mutable access by field name, `None` for unknown names.
    pub fn value_mut(&mut self, name: &str) -> Option<&mut f64> {
        let slot = match name {
            SPEED => &mut self.speed,
            OFFENSE => &mut self.offense,
            "offense_percent" => &mut self.offense_percent,
            PROTECTION => &mut self.protection,
            "protection_percent" => &mut self.protection_percent,
            "health" => &mut self.health,
            "health_percent" => &mut self.health_percent,
            "defense" => &mut self.defense,
            "defense_percent" => &mut self.defense_percent,
            "potency" => &mut self.potency,
            "tenacity" => &mut self.tenacity,
            "critical_chance" => &mut self.critical_chance,
            _ => return None,
        };
        Some(slot)
    }
}

/// An equippable stat item.
///
/// `equipped` is true exactly when `character_id` is set; use
/// [`Mod::equipped`] / [`Mod::unequipped`] to build records that hold this,
/// and [`Mod::validate`] on anything deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub id: String,
    pub ally_code: AllyCode,
    #[serde(default)]
    pub character_id: Option<String>,
    pub slot: ModSlot,
    #[serde(default)]
    pub set_type: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub tier: u32,
    #[serde(default)]
    pub rarity: u32,
    #[serde(default)]
    pub primary: PrimaryStat,
    #[serde(default)]
    pub secondary: SecondaryStats,
    pub equipped: bool,
}

impl Mod {
    /// A mod sitting in the free pool.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{AllyCode, Mod, ModSlot};
    ///
    /// let owner = AllyCode::parse("123456789").unwrap();
    /// let m = Mod::unequipped("m1", owner, ModSlot::Square).with_speed(12.0);
    /// assert!(!m.equipped);
    /// assert!(m.is_candidate_for("ANAKINKNIGHT"));
    /// ```
    pub fn unequipped(id: impl Into<String>, ally_code: AllyCode, slot: ModSlot) -> Self {
        Self {
            id: id.into(),
            ally_code,
            character_id: None,
            slot,
            set_type: String::new(),
            level: 1,
            tier: 1,
            rarity: 5,
            primary: PrimaryStat::default(),
            secondary: SecondaryStats::default(),
            equipped: false,
        }
    }

    /// A mod currently assigned to `character_id`.
    pub fn equipped(
        id: impl Into<String>,
        ally_code: AllyCode,
        character_id: impl Into<String>,
        slot: ModSlot,
    ) -> Self {
        Self {
            character_id: Some(character_id.into()),
            equipped: true,
            ..Self::unequipped(id, ally_code, slot)
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.secondary.speed = speed;
        self
    }

    pub fn with_offense(mut self, offense: f64) -> Self {
        self.secondary.offense = offense;
        self
    }

    pub fn with_protection(mut self, protection: f64) -> Self {
        self.secondary.protection = protection;
        self
    }

    /// Flat speed secondary.
    pub fn speed(&self) -> f64 {
        self.secondary.speed
    }

    /// Whether this mod may be handed to `character_id` by the optimizer:
    /// it is either free or already on that character.
    pub fn is_candidate_for(&self, character_id: &str) -> bool {
        !self.equipped || self.character_id.as_deref() == Some(character_id)
    }

    /// Check the equipped-flag invariant.
    pub fn validate(&self) -> Result<()> {
        match (self.equipped, &self.character_id) {
            (true, None) => Err(RosterError::InvalidMod {
                id: self.id.clone(),
                reason: "equipped without a character".into(),
            }),
            (false, Some(character)) => Err(RosterError::InvalidMod {
                id: self.id.clone(),
                reason: format!("unequipped but assigned to {}", character),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn owner() -> AllyCode {
        AllyCode::parse("123456789").unwrap()
    }

    #[test]
    fn test_slot_numbers_round_trip() {
        for slot in ModSlot::ALL {
            assert_eq!(ModSlot::try_from(slot.number()).unwrap(), slot);
        }
        assert_matches!(ModSlot::try_from(0u8), Err(RosterError::InvalidSlot(0)));
        assert_matches!(ModSlot::try_from(7u8), Err(RosterError::InvalidSlot(7)));
    }

    #[test]
    fn test_slot_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ModSlot::Triangle).unwrap(), "4");
        let slot: ModSlot = serde_json::from_str("2").unwrap();
        assert_eq!(slot, ModSlot::Arrow);
        assert!(serde_json::from_str::<ModSlot>("9").is_err());
    }

    #[test]
    fn test_secondary_lookup_by_name() {
        let mut stats = SecondaryStats::default();
        *stats.value_mut("potency").unwrap() = 1.5;
        *stats.value_mut("offense_percent").unwrap() = 2.0;
        assert_eq!(stats.potency, 1.5);
        assert_eq!(stats.offense_percent, 2.0);
        assert_eq!(stats.speed, 0.0);
        assert!(stats.value_mut("accuracy").is_none());
    }

    #[test]
    fn test_candidate_rules() {
        let free = Mod::unequipped("a", owner(), ModSlot::Square);
        let mine = Mod::equipped("b", owner(), "HERO", ModSlot::Square);
        let theirs = Mod::equipped("c", owner(), "OTHER", ModSlot::Square);

        assert!(free.is_candidate_for("HERO"));
        assert!(mine.is_candidate_for("HERO"));
        assert!(!theirs.is_candidate_for("HERO"));
    }

    #[test]
    fn test_validate_equipped_flag() {
        assert!(Mod::equipped("ok", owner(), "HERO", ModSlot::Arrow).validate().is_ok());

        let mut orphan = Mod::unequipped("x", owner(), ModSlot::Arrow);
        orphan.equipped = true;
        assert_matches!(orphan.validate(), Err(RosterError::InvalidMod { .. }));

        let mut stray = Mod::unequipped("y", owner(), ModSlot::Arrow);
        stray.character_id = Some("HERO".into());
        assert_matches!(stray.validate(), Err(RosterError::InvalidMod { .. }));
    }

    #[test]
    fn test_mod_deserialize_defaults_secondaries() {
        let json = r#"{
            "id": "m1",
            "ally_code": "123456789",
            "slot": 5,
            "secondary": { "speed": 14 },
            "equipped": false
        }"#;
        let m: Mod = serde_json::from_str(json).unwrap();
        assert_eq!(m.slot, ModSlot::Circle);
        assert_eq!(m.speed(), 14.0);
        assert_eq!(m.secondary.tenacity, 0.0);
        assert_eq!(m.primary.stat_type, "Unknown");
    }
}
