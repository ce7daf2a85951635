//! Roster comparison.
//!
//! Reduces two players' character collections to summary statistics for a
//! side-by-side view.

use crate::error::Result;
use crate::player::{AllyCode, Character, Player};
use crate::store::SnapshotStore;
use serde::{Deserialize, Serialize};

/// Number of characters covered by the top galactic power sum.
pub const TOP_N: usize = 10;

/// Summary of one roster.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total_characters: usize,
    pub avg_gear: f64,
    pub avg_relic: f64,
    /// Sum of the top-N galactic power values; 0 when the roster has
    /// fewer than N characters.
    pub top_gp: u64,
}

fn mean(values: impl Iterator<Item = u32>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.map(f64::from).sum::<f64>() / count as f64
}

/// Summarize a roster with the standard top-10 power sum.
pub fn summarize(characters: &[Character]) -> RosterSummary {
    summarize_with_top_n(characters, TOP_N)
}

/// Summarize a roster, summing the `top_n` highest galactic power values.
///
/// A roster with fewer than `top_n` characters reports a `top_gp` of 0
/// rather than a partial sum.
///
/// # Examples
///
/// ```rust
/// use modstat::{summarize_with_top_n, Character};
///
/// let roster: Vec<Character> = (1..=4)
///     .map(|i| Character::new(format!("C{}", i), 12, 0).with_galactic_power(i * 1000))
///     .collect();
///
/// assert_eq!(summarize_with_top_n(&roster, 3).top_gp, 9000);
/// assert_eq!(summarize_with_top_n(&roster, 5).top_gp, 0);
/// ```
pub fn summarize_with_top_n(characters: &[Character], top_n: usize) -> RosterSummary {
    let count = characters.len();

    let top_gp = if count < top_n {
        0
    } else {
        let mut powers: Vec<u64> = characters.iter().map(|c| c.galactic_power).collect();
        powers.sort_unstable_by(|a, b| b.cmp(a));
        powers.iter().take(top_n).sum()
    };

    RosterSummary {
        total_characters: count,
        avg_gear: mean(characters.iter().map(|c| c.gear_level), count),
        avg_relic: mean(characters.iter().map(|c| c.relic_tier), count),
        top_gp,
    }
}

/// Flat head-to-head comparison of two rosters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Comparison {
    pub count_a: usize,
    pub count_b: usize,
    pub avg_gear_a: f64,
    pub avg_gear_b: f64,
    pub avg_relic_a: f64,
    pub avg_relic_b: f64,
    pub top10_gp_sum_a: u64,
    pub top10_gp_sum_b: u64,
}

impl Comparison {
    pub fn from_summaries(a: &RosterSummary, b: &RosterSummary) -> Self {
        Self {
            count_a: a.total_characters,
            count_b: b.total_characters,
            avg_gear_a: a.avg_gear,
            avg_gear_b: b.avg_gear,
            avg_relic_a: a.avg_relic,
            avg_relic_b: b.avg_relic,
            top10_gp_sum_a: a.top_gp,
            top10_gp_sum_b: b.top_gp,
        }
    }
}

/// Compare two rosters. Empty rosters yield zeros.
///
/// # Examples
///
/// ```rust
/// use modstat::{compare, Comparison};
///
/// assert_eq!(compare(&[], &[]), Comparison::default());
/// ```
pub fn compare(characters_a: &[Character], characters_b: &[Character]) -> Comparison {
    Comparison::from_summaries(&summarize(characters_a), &summarize(characters_b))
}

/// Per-player summaries, keyed the way the presentation layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonStats {
    pub player1: RosterSummary,
    pub player2: RosterSummary,
}

/// Comparison of two stored players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// The players found in the store, in argument order.
    pub players: Vec<Player>,
    pub stats: ComparisonStats,
}

impl ComparisonReport {
    /// Flatten into a [`Comparison`].
    pub fn comparison(&self) -> Comparison {
        Comparison::from_summaries(&self.stats.player1, &self.stats.player2)
    }
}

/// Compare two stored players with the standard top-10 power sum.
pub fn compare_players(
    store: &dyn SnapshotStore,
    player1: &AllyCode,
    player2: &AllyCode,
) -> Result<ComparisonReport> {
    compare_players_with(store, player1, player2, TOP_N)
}

/// Compare two stored players.
///
/// Players absent from the store are left out of `players` and summarize
/// as empty rosters.
pub fn compare_players_with(
    store: &dyn SnapshotStore,
    player1: &AllyCode,
    player2: &AllyCode,
    top_n: usize,
) -> Result<ComparisonReport> {
    let mut players = Vec::with_capacity(2);
    for code in [player1, player2] {
        if let Some(player) = store.player(code)? {
            players.push(player);
        }
    }

    let stats = ComparisonStats {
        player1: summarize_with_top_n(&store.characters(player1)?, top_n),
        player2: summarize_with_top_n(&store.characters(player2)?, top_n),
    };
    tracing::debug!(
        player1 = %player1,
        player2 = %player2,
        characters1 = stats.player1.total_characters,
        characters2 = stats.player2.total_characters,
        top_n,
        "compared rosters"
    );

    Ok(ComparisonReport { players, stats })
}
