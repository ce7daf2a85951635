//! Mod scorer.
//!
//! Combines a base stat block with a set of mods and a weight vector into a
//! single scalar. Final stats are the base block plus each mod's flat
//! speed, offense and protection; the score is the weighted sum of those
//! final stats.

use crate::error::{Result, RosterError};
use crate::mods::Mod;
use crate::resolved::ResolvedStats;
use crate::source::StatSource;
use crate::stat_id::StatId;
use crate::stats::StatBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default weight on speed.
pub const DEFAULT_SPEED_WEIGHT: f64 = 1.0;
/// Default weight on offense.
pub const DEFAULT_OFFENSE_WEIGHT: f64 = 0.5;
/// Default weight on protection.
pub const DEFAULT_PROTECTION_WEIGHT: f64 = 0.3;

/// Request-scoped map from stat name to weight.
///
/// Kept ordered by stat name so summation is reproducible. Weights on
/// names outside speed/offense/protection are accepted and contribute 0.
///
/// # Examples
///
/// ```rust
/// use modstat::{StatBlock, StatWeights};
///
/// let weights = StatWeights::new().with("speed", 2.0).with("Offense", 0.1);
/// let block = StatBlock::new(200.0, 1000.0, 10000.0);
/// assert_eq!(weights.weigh(&block), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatWeights(BTreeMap<StatId, f64>);

impl Default for StatWeights {
    /// speed 1.0, offense 0.5, protection 0.3.
    fn default() -> Self {
        Self::new()
            .with(StatId::speed(), DEFAULT_SPEED_WEIGHT)
            .with(StatId::offense(), DEFAULT_OFFENSE_WEIGHT)
            .with(StatId::protection(), DEFAULT_PROTECTION_WEIGHT)
    }
}

impl StatWeights {
    /// An empty weight vector.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace a weight, builder style.
    pub fn with(mut self, stat: impl Into<StatId>, weight: f64) -> Self {
        self.set(stat, weight);
        self
    }

    pub fn set(&mut self, stat: impl Into<StatId>, weight: f64) {
        self.0.insert(stat.into(), weight);
    }

    pub fn get(&self, stat: &StatId) -> Option<f64> {
        self.0.get(stat).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatId, f64)> {
        self.0.iter().map(|(stat, weight)| (stat, *weight))
    }

    /// Replace an empty vector with the defaults.
    pub fn or_default(self) -> Self {
        if self.is_empty() {
            Self::default()
        } else {
            self
        }
    }

    /// Weighted sum over a source's contribution; unknown stats contribute 0.
    pub fn weigh(&self, source: &dyn StatSource) -> f64 {
        self.iter()
            .map(|(stat, weight)| source.value_of(stat) * weight)
            .sum()
    }

    /// Strictly parse weights from a JSON object of name to finite number.
    ///
    /// An empty object is valid and yields an empty vector.
    pub fn try_from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            RosterError::InvalidWeights(format!("expected an object, got {}", value))
        })?;

        let mut weights = Self::new();
        for (name, raw) in object {
            let weight = raw.as_f64().filter(|w| w.is_finite()).ok_or_else(|| {
                RosterError::InvalidWeights(format!("weight for '{}' is not a finite number", name))
            })?;
            weights.set(name.as_str(), weight);
        }
        Ok(weights)
    }

    /// Read weights from an optional request field, recovering locally.
    ///
    /// Missing, malformed or empty weights fall back to the defaults, so
    /// this never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modstat::StatWeights;
    /// use serde_json::json;
    ///
    /// assert_eq!(StatWeights::from_json_or_default(None), StatWeights::default());
    /// assert_eq!(StatWeights::from_json_or_default(Some(&json!("fast"))), StatWeights::default());
    ///
    /// let custom = StatWeights::from_json_or_default(Some(&json!({"speed": 3})));
    /// assert_eq!(custom, StatWeights::new().with("speed", 3.0));
    /// ```
    pub fn from_json_or_default(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match Self::try_from_json(value) {
            Ok(weights) => weights.or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "malformed stat weights, using defaults");
                Self::default()
            }
        }
    }
}

impl<S: Into<StatId>> FromIterator<(S, f64)> for StatWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (stat, weight) in iter {
            weights.set(stat, weight);
        }
        weights
    }
}

/// Output of [`score`]: the scalar plus the stats it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStats {
    pub score: f64,
    pub stats: ResolvedStats,
}

impl ScoredStats {
    /// Final speed/offense/protection totals.
    pub fn final_stats(&self) -> StatBlock {
        self.stats.totals
    }
}

/// Score a base stat block with a set of mods under a weight vector.
///
/// Inputs are not modified. Only flat speed, offense and protection from
/// each mod are summed into the final stats.
///
/// # Examples
///
/// ```rust
/// use modstat::{score, StatBlock, StatWeights};
///
/// let base = StatBlock::new(235.0, 2300.0, 23000.0);
/// let scored = score(&base, &[], &StatWeights::default());
/// assert_eq!(scored.score, 8285.0);
/// assert_eq!(scored.final_stats(), base);
/// ```
pub fn score(base: &StatBlock, mods: &[Mod], weights: &StatWeights) -> ScoredStats {
    let mut stats = ResolvedStats::new();
    stats.add_source(base);
    for m in mods {
        stats.add_source(m);
    }

    ScoredStats {
        score: weights.weigh(&stats.totals),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mods::ModSlot;
    use crate::player::AllyCode;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn owner() -> AllyCode {
        AllyCode::parse("123456789").unwrap()
    }

    #[test]
    fn test_default_weights_score() {
        let base = StatBlock::new(235.0, 2300.0, 23000.0);
        let scored = score(&base, &[], &StatWeights::default());
        assert_eq!(scored.score, 235.0 + 1150.0 + 6900.0);
    }

    #[test]
    fn test_mods_add_flat_stats_only() {
        let base = StatBlock::new(100.0, 1000.0, 10000.0);
        let mut m = Mod::unequipped("m", owner(), ModSlot::Arrow)
            .with_speed(20.0)
            .with_offense(10.0)
            .with_protection(100.0);
        m.secondary.offense_percent = 50.0;
        m.secondary.health = 1000.0;

        let scored = score(&base, &[m], &StatWeights::default());
        assert_eq!(scored.final_stats(), StatBlock::new(120.0, 1010.0, 10100.0));
        assert_eq!(scored.stats.sources.len(), 2);
    }

    #[test]
    fn test_score_does_not_mutate_inputs() {
        let base = StatBlock::new(100.0, 1000.0, 10000.0);
        let mods = vec![Mod::unequipped("m", owner(), ModSlot::Square).with_speed(5.0)];
        let before = (base, mods.clone());

        let _ = score(&base, &mods, &StatWeights::default());
        assert_eq!((base, mods), before);
    }

    #[test]
    fn test_weight_linearity() {
        let base = StatBlock::new(150.0, 1500.0, 15000.0);
        let single = StatWeights::new().with("offense", 0.5).with("speed", 1.0);
        let doubled = StatWeights::new().with("offense", 1.0).with("speed", 1.0);

        let delta = score(&base, &[], &doubled).score - score(&base, &[], &single).score;
        assert_eq!(delta, 1500.0 * 0.5);
    }

    #[test]
    fn test_unknown_stat_contributes_zero() {
        let base = StatBlock::new(100.0, 1000.0, 10000.0);
        let weights = StatWeights::new().with("potency", 100.0).with("speed", 1.0);
        assert_eq!(score(&base, &[], &weights).score, 100.0);
    }

    #[test]
    fn test_weigh_a_single_mod() {
        let mut m = Mod::unequipped("m", owner(), ModSlot::Cross)
            .with_speed(10.0)
            .with_offense(20.0);
        m.secondary.potency = 50.0;
        let weights = StatWeights::default().with("potency", 100.0);
        assert_eq!(weights.weigh(&m), 10.0 + 10.0);
    }

    #[test]
    fn test_empty_weights_score_zero() {
        let base = StatBlock::new(100.0, 1000.0, 10000.0);
        assert_eq!(score(&base, &[], &StatWeights::new()).score, 0.0);
    }

    #[test]
    fn test_try_from_json_rejects_malformed() {
        assert_matches!(
            StatWeights::try_from_json(&json!([1, 2])),
            Err(RosterError::InvalidWeights(_))
        );
        assert_matches!(
            StatWeights::try_from_json(&json!(null)),
            Err(RosterError::InvalidWeights(_))
        );
        assert_matches!(
            StatWeights::try_from_json(&json!({"speed": "fast"})),
            Err(RosterError::InvalidWeights(_))
        );
    }

    #[test]
    fn test_try_from_json_normalizes_names() {
        let weights =
            StatWeights::try_from_json(&json!({"Speed": 2, " protection": 0.25})).unwrap();
        assert_eq!(weights.get(&StatId::speed()), Some(2.0));
        assert_eq!(weights.get(&StatId::protection()), Some(0.25));
    }

    #[test]
    fn test_lenient_parse_recovers() {
        assert_eq!(
            StatWeights::from_json_or_default(Some(&json!({}))),
            StatWeights::default()
        );
        assert_eq!(
            StatWeights::from_json_or_default(Some(&json!({"speed": null}))),
            StatWeights::default()
        );
    }

    #[test]
    fn test_weights_serde_transparent() {
        let weights: StatWeights = serde_json::from_str(r#"{"SPEED": 1.5}"#).unwrap();
        assert_eq!(weights, StatWeights::new().with("speed", 1.5));
        assert_eq!(serde_json::to_string(&weights).unwrap(), r#"{"speed":1.5}"#);
    }
}
