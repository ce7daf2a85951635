//! Slot allocator.
//!
//! Picks one mod per slot for a single character from the player's pool of
//! free mods and mods already on that character, then scores the result.
//!
//! The default rule, [`SelectionStrategy::GreedySpeed`], looks only at each
//! candidate's flat speed when choosing, whatever the weight vector says;
//! the weights only affect the final score. Slots are chosen independently
//! and there is no set-bonus or cross-character reasoning.
//! [`SelectionStrategy::GreedyWeighted`] is a separate rule that ranks
//! candidates by their weighted contribution instead.

use crate::compare::{compare_players_with, ComparisonReport};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::mods::{Mod, ModSlot};
use crate::player::{AllyCode, Character};
use crate::scorer::{score, StatWeights};
use crate::stats::{derive_base_stats, StatBlock};
use crate::store::{ModFilter, SnapshotStore};
use serde::{Deserialize, Serialize};

/// Rule for ranking the candidates of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest flat speed wins.
    #[default]
    GreedySpeed,
    /// Highest weighted speed/offense/protection contribution wins.
    GreedyWeighted,
}

impl SelectionStrategy {
    fn rank(self, m: &Mod, weights: &StatWeights) -> f64 {
        match self {
            SelectionStrategy::GreedySpeed => m.speed(),
            SelectionStrategy::GreedyWeighted => weights.weigh(m),
        }
    }
}

/// Result of optimizing one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimization {
    pub character: Character,
    /// Chosen mods in slot order; absent slots had no candidate.
    pub recommended_mods: Vec<Mod>,
    pub final_stats: StatBlock,
    pub score: f64,
    /// Per-source contributions behind `final_stats`.
    pub breakdown: Vec<(String, StatBlock)>,
    pub strategy: SelectionStrategy,
}

impl Optimization {
    /// The mod chosen for `slot`, if any.
    pub fn mod_in(&self, slot: ModSlot) -> Option<&Mod> {
        self.recommended_mods.iter().find(|m| m.slot == slot)
    }
}

/// Choose at most one candidate per slot, in slot order.
///
/// Mods equipped on other characters are never chosen. Within a slot the
/// first candidate with the top rank wins.
fn select<'a>(
    strategy: SelectionStrategy,
    character_id: &str,
    pool: &'a [Mod],
    weights: &StatWeights,
) -> Vec<&'a Mod> {
    let mut best: [Option<(&'a Mod, f64)>; 6] = [None; 6];

    for m in pool.iter().filter(|m| m.is_candidate_for(character_id)) {
        let rank = strategy.rank(m, weights);
        let idx = m.slot.index();
        let replace = match best[idx] {
            Some((_, top)) => rank > top,
            None => true,
        };
        if replace {
            best[idx] = Some((m, rank));
        }
    }

    ModSlot::ALL
        .iter()
        .filter_map(|slot| {
            let (m, rank) = best[slot.index()]?;
            tracing::debug!(
                character = %character_id,
                slot = %slot,
                shape = slot.shape(),
                mod_id = %m.id,
                rank,
                "selected mod"
            );
            Some(m)
        })
        .collect()
}

/// Optimize one character with the default greedy-by-speed rule.
///
/// Empty weights mean the default weight vector.
///
/// # Examples
///
/// ```rust
/// use modstat::{allocate, AllyCode, Character, Mod, ModSlot, StatWeights};
///
/// let owner = AllyCode::parse("123456789").unwrap();
/// let hero = Character::new("HERO", 13, 7);
/// let pool = vec![
///     Mod::unequipped("slow", owner.clone(), ModSlot::Square).with_speed(5.0).with_offense(500.0),
///     Mod::unequipped("fast", owner.clone(), ModSlot::Square).with_speed(18.0),
/// ];
///
/// let result = allocate(&hero, &pool, &StatWeights::default());
/// assert_eq!(result.recommended_mods.len(), 1);
/// assert_eq!(result.recommended_mods[0].id, "fast");
/// assert_eq!(result.final_stats.speed, 253.0);
/// ```
pub fn allocate(character: &Character, pool: &[Mod], weights: &StatWeights) -> Optimization {
    allocate_with(SelectionStrategy::GreedySpeed, character, pool, weights)
}

/// Optimize one character with an explicit selection rule.
pub fn allocate_with(
    strategy: SelectionStrategy,
    character: &Character,
    pool: &[Mod],
    weights: &StatWeights,
) -> Optimization {
    let weights = if weights.is_empty() {
        StatWeights::default()
    } else {
        weights.clone()
    };

    let chosen: Vec<Mod> = select(strategy, &character.base_id, pool, &weights)
        .into_iter()
        .cloned()
        .collect();
    let scored = score(&derive_base_stats(character), &chosen, &weights);

    Optimization {
        character: character.clone(),
        final_stats: scored.final_stats(),
        score: scored.score,
        breakdown: scored.stats.sources,
        recommended_mods: chosen,
        strategy,
    }
}

/// Look a character up in the store and optimize it.
///
/// Fails with `NotFound` when the player has no such character.
pub fn optimize(
    store: &dyn SnapshotStore,
    ally_code: &AllyCode,
    character_id: &str,
    weights: &StatWeights,
) -> Result<Optimization> {
    Optimizer::default().optimize(store, ally_code, character_id, weights)
}

/// Optimize every character of a player independently, in roster order.
pub fn optimize_roster(
    store: &dyn SnapshotStore,
    ally_code: &AllyCode,
    weights: &StatWeights,
) -> Result<Vec<Optimization>> {
    Optimizer::default().optimize_roster(store, ally_code, weights)
}

/// Store-backed optimizer carrying an [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: EngineConfig,
}

impl Optimizer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn effective_weights(&self, weights: &StatWeights) -> StatWeights {
        if weights.is_empty() {
            self.config.default_weights.clone()
        } else {
            weights.clone()
        }
    }

    /// Optimize one stored character.
    pub fn optimize(
        &self,
        store: &dyn SnapshotStore,
        ally_code: &AllyCode,
        character_id: &str,
        weights: &StatWeights,
    ) -> Result<Optimization> {
        let character = store.require_character(ally_code, character_id)?;
        let pool = store.candidate_mods(ally_code, character_id)?;
        tracing::debug!(
            character = %character_id,
            ally_code = %ally_code,
            candidates = pool.len(),
            "optimizing character"
        );

        Ok(allocate_with(
            self.config.strategy,
            &character,
            &pool,
            &self.effective_weights(weights),
        ))
    }

    /// Optimize each stored character of a player on its own.
    ///
    /// Every character sees the same free pool, so a free mod may be
    /// recommended to more than one character.
    pub fn optimize_roster(
        &self,
        store: &dyn SnapshotStore,
        ally_code: &AllyCode,
        weights: &StatWeights,
    ) -> Result<Vec<Optimization>> {
        let weights = self.effective_weights(weights);
        let characters = store.characters(ally_code)?;
        let mods = store.mods(ally_code, ModFilter::All)?;

        Ok(characters
            .iter()
            .map(|character| allocate_with(self.config.strategy, character, &mods, &weights))
            .collect())
    }

    /// Compare two stored players over the configured top-N.
    pub fn compare_players(
        &self,
        store: &dyn SnapshotStore,
        player1: &AllyCode,
        player2: &AllyCode,
    ) -> Result<ComparisonReport> {
        compare_players_with(store, player1, player2, self.config.top_n)
    }
}
