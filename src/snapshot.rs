//! Snapshot ingest.
//!
//! Turns the player payload fetched from the third-party site into typed
//! records. Only character units are kept; equipped mods found on them are
//! normalized into [`Mod`] records with zero-defaulted secondaries.

use crate::error::Result;
use crate::mods::{Mod, ModSlot, PrimaryStat, SecondaryStats};
use crate::player::{
    AllyCode, Character, Player, DEFAULT_PLAYER_LEVEL, NO_GUILD, UNKNOWN_PLAYER_NAME,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// `combat_type` of character units; ships use other values.
pub const CHARACTER_COMBAT_TYPE: u8 = 1;

/// Everything stored for one player after a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: Player,
    pub characters: Vec<Character>,
    pub mods: Vec<Mod>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    name: Option<String>,
    level: Option<u32>,
    guild_name: Option<String>,
    #[serde(default)]
    galactic_power: u64,
    #[serde(default)]
    character_galactic_power: u64,
    #[serde(default)]
    ship_galactic_power: u64,
    #[serde(default)]
    roster: Vec<RawUnit>,
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    #[serde(default)]
    base_id: String,
    #[serde(default)]
    name: String,
    #[serde(default = "one")]
    level: u32,
    #[serde(default = "one")]
    gear_level: u32,
    #[serde(default)]
    relic_tier: u32,
    #[serde(default)]
    power: u64,
    #[serde(default)]
    galactic_power: u64,
    combat_type: Option<u8>,
    #[serde(default)]
    mods: Vec<RawMod>,
}

#[derive(Debug, Deserialize)]
struct RawMod {
    id: Option<String>,
    /// Kept raw so one out-of-range slot drops only its own mod.
    #[serde(default = "first_slot")]
    slot: serde_json::Value,
    set: Option<serde_json::Value>,
    #[serde(default = "one")]
    level: u32,
    #[serde(default = "one")]
    tier: u32,
    #[serde(default = "five")]
    rarity: u32,
    primary_stat: Option<RawStat>,
    #[serde(default)]
    secondary_stats: Vec<RawStat>,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: f64,
}

fn one() -> u32 {
    1
}

fn first_slot() -> serde_json::Value {
    serde_json::Value::from(ModSlot::Square.number())
}

fn five() -> u32 {
    5
}

/// Stats reported both flat and as a percentage: (label word, flat field,
/// percent field).
const SPLIT_STATS: [(&str, &str, &str); 4] = [
    ("offense", "offense", "offense_percent"),
    ("protection", "protection", "protection_percent"),
    ("health", "health", "health_percent"),
    ("defense", "defense", "defense_percent"),
];

/// Map a site stat label onto a secondary stat field name.
///
/// Returns `None` for labels that are not tracked.
fn secondary_field(label: &str) -> Option<&'static str> {
    let label = label.to_lowercase();
    if label.contains("speed") {
        return Some("speed");
    }
    let percent = label.contains('%');
    for (word, flat, pct) in SPLIT_STATS {
        if label.contains(word) {
            return Some(if percent { pct } else { flat });
        }
    }
    if label.contains("potency") {
        Some("potency")
    } else if label.contains("tenacity") {
        Some("tenacity")
    } else if label.contains("crit") {
        Some("critical_chance")
    } else {
        None
    }
}

fn set_label(set: Option<serde_json::Value>) -> String {
    match set {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::from("1"),
        Some(other) => other.to_string(),
    }
}

impl RawMod {
    fn into_mod(self, ally_code: &AllyCode, character_id: &str) -> Option<Mod> {
        let slot = self
            .slot
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(|n| ModSlot::try_from(n).ok());
        let Some(slot) = slot else {
            tracing::warn!(
                character = %character_id,
                mod_id = ?self.id,
                slot = %self.slot,
                "skipping mod with invalid slot"
            );
            return None;
        };
        let id = self
            .id
            .unwrap_or_else(|| format!("{}_{}_{}", ally_code, character_id, slot));

        let mut secondary = SecondaryStats::default();
        for stat in &self.secondary_stats {
            let field = secondary_field(&stat.name).and_then(|name| secondary.value_mut(name));
            if let Some(field) = field {
                *field = stat.value;
            }
        }

        let primary = self
            .primary_stat
            .map(|p| PrimaryStat {
                stat_type: p.name,
                value: p.value,
            })
            .unwrap_or_default();

        let mut m = Mod::equipped(id, ally_code.clone(), character_id, slot);
        m.set_type = set_label(self.set);
        m.level = self.level;
        m.tier = self.tier;
        m.rarity = self.rarity;
        m.primary = primary;
        m.secondary = secondary;
        Some(m)
    }
}

impl PlayerSnapshot {
    pub fn new(player: Player, characters: Vec<Character>, mods: Vec<Mod>) -> Self {
        Self {
            player,
            characters,
            mods,
        }
    }

    /// Normalize a player payload.
    ///
    /// Accepts either `{"data": {...}}` or the inner object. The ally code
    /// inside the payload is ignored in favour of `ally_code`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::{AllyCode, PlayerSnapshot};
    /// use serde_json::json;
    ///
    /// let code = AllyCode::parse("123456789").unwrap();
    /// let payload = json!({"data": {"name": "Rey", "roster": [
    ///     {"base_id": "REYJEDITRAINING", "gear_level": 12, "combat_type": 1},
    ///     {"base_id": "MILLENNIUMFALCON", "combat_type": 2}
    /// ]}});
    ///
    /// let snapshot = PlayerSnapshot::from_payload(&code, &payload, chrono::Utc::now()).unwrap();
    /// assert_eq!(snapshot.player.name, "Rey");
    /// assert_eq!(snapshot.characters.len(), 1);
    /// ```
    pub fn from_payload(
        ally_code: &AllyCode,
        payload: &serde_json::Value,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self> {
        let body = payload.get("data").filter(|d| d.is_object()).unwrap_or(payload);
        let raw: RawPlayer = serde_json::from_value(body.clone())?;

        let player = Player {
            ally_code: ally_code.clone(),
            name: raw.name.unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string()),
            level: raw.level.unwrap_or(DEFAULT_PLAYER_LEVEL),
            guild_name: raw.guild_name.unwrap_or_else(|| NO_GUILD.to_string()),
            galactic_power: raw.galactic_power,
            character_gp: raw.character_galactic_power,
            ship_gp: raw.ship_galactic_power,
            last_updated: fetched_at,
        };

        let mut characters = Vec::new();
        let mut mods = Vec::new();
        let mut skipped_units = 0usize;
        for unit in raw.roster {
            if unit.combat_type != Some(CHARACTER_COMBAT_TYPE) {
                skipped_units += 1;
                continue;
            }
            mods.extend(
                unit.mods
                    .into_iter()
                    .filter_map(|m| m.into_mod(ally_code, &unit.base_id)),
            );
            characters.push(Character {
                base_id: unit.base_id,
                name: unit.name,
                level: unit.level,
                gear_level: unit.gear_level,
                relic_tier: unit.relic_tier,
                power: unit.power,
                galactic_power: unit.galactic_power,
            });
        }

        tracing::info!(
            ally_code = %ally_code,
            characters = characters.len(),
            mods = mods.len(),
            skipped_units,
            "normalized snapshot"
        );

        Ok(Self::new(player, characters, mods))
    }

    /// The demo roster used when the site cannot be reached.
    pub fn demo(ally_code: &AllyCode) -> Result<Self> {
        let payload = json!({
            "data": {
                "name": "Demo Player",
                "level": 85,
                "ally_code": ally_code.as_str(),
                "galactic_power": 5_000_000,
                "character_galactic_power": 3_500_000,
                "ship_galactic_power": 1_500_000,
                "roster": [
                    {
                        "base_id": "ANAKINKNIGHT",
                        "name": "Jedi Knight Anakin",
                        "level": 85,
                        "gear_level": 13,
                        "relic_tier": 7,
                        "power": 28500,
                        "combat_type": 1,
                        "mods": []
                    },
                    {
                        "base_id": "GRANDMASTERYODA",
                        "name": "Grand Master Yoda",
                        "level": 85,
                        "gear_level": 12,
                        "relic_tier": 5,
                        "power": 25000,
                        "combat_type": 1,
                        "mods": []
                    }
                ]
            }
        });
        Self::from_payload(ally_code, &payload, Utc::now())
    }
}
