//! Stat identifier module.
//!
//! Provides the `StatId` type, an interned stat name used as the key of
//! weight vectors and stat blocks. Names are normalized (trimmed and
//! lowercased) so `"Speed"` and `" speed"` address the same stat.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Name of the speed stat.
pub const SPEED: &str = "speed";
/// Name of the flat offense stat.
pub const OFFENSE: &str = "offense";
/// Name of the flat protection stat.
pub const PROTECTION: &str = "protection";

/// Stats that take part in totals and scoring, in display order.
pub const TRACKED_STATS: [&str; 3] = [SPEED, OFFENSE, PROTECTION];

/// Interned, normalized stat name.
///
/// Uses `Arc<str>` so weight maps can be cloned cheaply per request.
///
/// # Examples
///
/// ```rust
/// use modstat::StatId;
///
/// let speed = StatId::new("Speed");
/// let speed2: StatId = " speed ".into();
///
/// assert_eq!(speed, speed2);
/// assert_eq!(speed.as_str(), "speed");
/// assert!(speed.is_tracked());
/// assert!(!StatId::new("potency").is_tracked());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatId(Arc<str>);

impl Serialize for StatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatId::new(&s))
    }
}

impl StatId {
    /// Create a `StatId` from any spelling of a stat name.
    pub fn new(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        Self(Arc::from(normalized))
    }

    /// The speed stat.
    pub fn speed() -> Self {
        Self(Arc::from(SPEED))
    }

    /// The flat offense stat.
    pub fn offense() -> Self {
        Self(Arc::from(OFFENSE))
    }

    /// The flat protection stat.
    pub fn protection() -> Self {
        Self(Arc::from(PROTECTION))
    }

    /// Get the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this stat participates in stat totals.
    ///
    /// Only speed, offense and protection are summed into final stats;
    /// weights on any other name contribute nothing to a score.
    pub fn is_tracked(&self) -> bool {
        TRACKED_STATS.contains(&self.as_str())
    }
}

impl From<&str> for StatId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StatId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl std::fmt::Display for StatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_id_normalization() {
        assert_eq!(StatId::new("  PROTECTION "), StatId::protection());
        assert_eq!(StatId::new("Offense").as_str(), "offense");
    }

    #[test]
    fn test_stat_id_from_string() {
        let id: StatId = String::from("Speed").into();
        assert_eq!(id, StatId::speed());
    }

    #[test]
    fn test_tracked_stats() {
        for name in TRACKED_STATS {
            assert!(StatId::new(name).is_tracked());
        }
        assert!(!StatId::new("tenacity").is_tracked());
        assert!(!StatId::new("offense_percent").is_tracked());
    }

    #[test]
    fn test_stat_id_serde() {
        let id: StatId = serde_json::from_str("\"SPEED\"").unwrap();
        assert_eq!(id, StatId::speed());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"speed\"");
    }
}
