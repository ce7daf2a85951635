//! Resolved stat results module.
//!
//! Contains the `ResolvedStats` type: the final stat block of a character
//! together with a breakdown of every source that contributed to it.

use crate::source::StatSource;
use crate::stats::StatBlock;
use serde::{Deserialize, Serialize};

/// Final stats with full breakdown information.
///
/// Read-only once built and safe to ship to a presentation layer.
///
/// # Examples
///
/// ```rust
/// use modstat::{ResolvedStats, StatBlock};
///
/// let mut resolved = ResolvedStats::new();
/// resolved.add_source(&StatBlock::new(200.0, 2000.0, 20000.0));
/// resolved.add_labelled("Speed arrow", StatBlock::new(30.0, 0.0, 0.0));
///
/// assert_eq!(resolved.totals.speed, 230.0);
/// assert_eq!(resolved.sources.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStats {
    /// Sum of all contributions.
    pub totals: StatBlock,

    /// Each entry is `(source_label, contribution)`, in the order added.
    pub sources: Vec<(String, StatBlock)>,
}

impl ResolvedStats {
    /// Create an empty result with zero totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source's contribution to the totals and the breakdown.
    pub fn add_source(&mut self, source: &dyn StatSource) {
        self.add_labelled(source.label(), source.contribution());
    }

    /// Add a contribution under an explicit label.
    pub fn add_labelled(&mut self, label: impl Into<String>, contribution: StatBlock) {
        self.totals += contribution;
        self.sources.push((label.into(), contribution));
    }
}
