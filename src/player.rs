//! Player and character records.
//!
//! A `Player` is keyed by its `AllyCode` and owns a roster of
//! `Character`s. Both are replaced wholesale on every snapshot ingest.

use crate::error::{Result, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of digits in an ally code.
pub const ALLY_CODE_LEN: usize = 9;

/// Validated player identifier: exactly nine ASCII digits.
///
/// Dashes and surrounding whitespace are accepted on input and stripped,
/// so `"123-456-789"` and `"123456789"` are the same ally code.
///
/// # Examples
///
/// ```rust
/// use modstat::AllyCode;
///
/// let code: AllyCode = "299-146-629".parse().unwrap();
/// assert_eq!(code.as_str(), "299146629");
/// assert!("12345".parse::<AllyCode>().is_err());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AllyCode(String);

impl AllyCode {
    /// Parse and validate an ally code.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != '-').collect();
        if cleaned.len() != ALLY_CODE_LEN || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RosterError::InvalidAllyCode(raw.to_string()));
        }
        Ok(Self(cleaned))
    }

    /// The nine-digit form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AllyCode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AllyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AllyCode {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AllyCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        AllyCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Player account summary. Upserted on every ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub ally_code: AllyCode,
    pub name: String,
    pub level: u32,
    pub guild_name: String,
    pub galactic_power: u64,
    pub character_gp: u64,
    pub ship_gp: u64,
    pub last_updated: DateTime<Utc>,
}

/// Name recorded when a payload carries none.
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";
/// Guild recorded when a payload carries none.
pub const NO_GUILD: &str = "No Guild";
/// Account level recorded when a payload carries none.
pub const DEFAULT_PLAYER_LEVEL: u32 = 85;

impl Player {
    /// A player with default name, guild and level and no galactic power,
    /// refreshed now.
    pub fn placeholder(ally_code: AllyCode) -> Self {
        Self {
            ally_code,
            name: UNKNOWN_PLAYER_NAME.to_string(),
            level: DEFAULT_PLAYER_LEVEL,
            guild_name: NO_GUILD.to_string(),
            galactic_power: 0,
            character_gp: 0,
            ship_gp: 0,
            last_updated: Utc::now(),
        }
    }
}

/// One character of a player's roster.
///
/// Numeric attributes default to zero when absent from a payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Character {
    pub base_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub gear_level: u32,
    /// Relic tier, 0 when the character has none.
    #[serde(default)]
    pub relic_tier: u32,
    /// Power as reported by the data source.
    #[serde(default)]
    pub power: u64,
    #[serde(default)]
    pub galactic_power: u64,
}

impl Character {
    /// Create a character with the given progression and everything else zeroed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::Character;
    ///
    /// let anakin = Character::new("ANAKINKNIGHT", 13, 7);
    /// assert_eq!(anakin.gear_level, 13);
    /// assert_eq!(anakin.galactic_power, 0);
    /// ```
    pub fn new(base_id: impl Into<String>, gear_level: u32, relic_tier: u32) -> Self {
        Self {
            base_id: base_id.into(),
            gear_level,
            relic_tier,
            ..Self::default()
        }
    }

    /// Set the galactic power, builder style.
    pub fn with_galactic_power(mut self, galactic_power: u64) -> Self {
        self.galactic_power = galactic_power;
        self
    }

    /// Set the display name, builder style.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
