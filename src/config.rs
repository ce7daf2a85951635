//! Engine configuration.
//!
//! Every field has a default that reproduces the built-in behavior, so an
//! empty JSON object is a valid configuration.

use crate::allocator::SelectionStrategy;
use crate::compare::TOP_N;
use crate::error::Result;
use crate::scorer::StatWeights;
use serde::{Deserialize, Serialize};

/// Tunables for optimization and comparison.
///
/// # Examples
///
/// ```rust
/// use modstat::{EngineConfig, SelectionStrategy};
///
/// let config = EngineConfig::from_json_str(r#"{"strategy": "greedy_weighted"}"#).unwrap();
/// assert_eq!(config.strategy, SelectionStrategy::GreedyWeighted);
/// assert_eq!(config.top_n, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weights used when a request supplies none.
    pub default_weights: StatWeights,
    /// How many characters the galactic power sum of a comparison covers.
    pub top_n: usize,
    /// Per-slot selection rule of the optimizer.
    pub strategy: SelectionStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_weights: StatWeights::default(),
            top_n: TOP_N,
            strategy: SelectionStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_json_str(
            r#"{"default_weights": {"speed": 2.0}, "top_n": 5}"#,
        )
        .unwrap();
        assert_eq!(config.default_weights, StatWeights::new().with("speed", 2.0));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.strategy, SelectionStrategy::GreedySpeed);
    }

    #[test]
    fn test_malformed_document() {
        assert!(EngineConfig::from_json_str(r#"{"top_n": "ten"}"#).is_err());
    }
}
