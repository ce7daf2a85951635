//! # modstat - Mod Assignment and Roster Comparison Engine
//!
//! A small, deterministic engine behind a personal roster dashboard for a
//! mobile game:
//! - **Stat model**: base speed/offense/protection from gear and relic tier
//! - **Mod scorer**: weighted linear score of base stats plus chosen mods
//! - **Slot allocator**: one mod per slot, greedy by speed
//! - **Comparison**: head-to-head roster summaries
//!
//! ## Pipeline
//!
//! ```text
//! [SnapshotStore] → [derive_base_stats] → [score] ← [allocate]
//!                 → [compare]
//! ```
//!
//! 1. **Snapshots** are normalized from a fetched payload and stored
//! 2. **Base stats** are derived from a character's progression
//! 3. **Allocation** picks the fastest candidate for each slot
//! 4. **Scoring** sums base stats and mod secondaries under user weights
//!
//! The core performs no I/O. Stores are passed into each call; nothing is
//! held between calls, so independent characters can be optimized in
//! parallel.
//!
//! ## Example
//!
//! ```rust
//! use modstat::*;
//!
//! let owner = AllyCode::parse("123-456-789").unwrap();
//! let store = InMemorySnapshotStore::new();
//! store
//!     .replace_snapshot(PlayerSnapshot::new(
//!         Player::placeholder(owner.clone()),
//!         vec![Character::new("ANAKINKNIGHT", 13, 7)],
//!         vec![Mod::unequipped("m1", owner.clone(), ModSlot::Arrow).with_speed(30.0)],
//!     ))
//!     .unwrap();
//!
//! let result = optimize(&store, &owner, "ANAKINKNIGHT", &StatWeights::default()).unwrap();
//! assert_eq!(result.final_stats.speed, 265.0);
//! assert_eq!(result.score, 8315.0);
//! ```
//!
//! ## Modules
//!
//! - [`stat_id`] - Stat names
//! - [`player`] - Players, ally codes and characters
//! - [`mods`] - Mods and slots
//! - [`source`] - Additive stat sources
//! - [`stats`] - Base stat derivation
//! - [`resolved`] - Final stats with breakdown
//! - [`scorer`] - Weights and scoring
//! - [`allocator`] - Per-slot mod selection
//! - [`compare`] - Roster comparison
//! - [`snapshot`] - Payload normalization
//! - [`loadout`] - Saved loadouts
//! - [`store`] - Snapshot store contract
//! - [`config`] - Engine configuration
//! - [`error`] - Error types

pub mod allocator;
pub mod compare;
pub mod config;
pub mod error;
pub mod loadout;
pub mod mods;
pub mod player;
pub mod resolved;
pub mod scorer;
pub mod snapshot;
pub mod source;
pub mod stat_id;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use error::{Result, RosterError};
pub use mods::{Mod, ModSlot, PrimaryStat, SecondaryStats};
pub use player::{AllyCode, Character, Player};
pub use resolved::ResolvedStats;
pub use source::StatSource;
pub use stat_id::StatId;
pub use stats::{derive_base_stats, StatBlock};

// Re-export the engine entry points
pub use allocator::{
    allocate, allocate_with, optimize, optimize_roster, Optimization, Optimizer,
    SelectionStrategy,
};
pub use compare::{
    compare, compare_players, compare_players_with, summarize, summarize_with_top_n, Comparison,
    ComparisonReport, ComparisonStats, RosterSummary,
};
pub use scorer::{score, ScoredStats, StatWeights};

// Re-export snapshot and store types
pub use loadout::{Loadout, NewLoadout};
pub use snapshot::PlayerSnapshot;
pub use store::{InMemorySnapshotStore, ModFilter, SnapshotStore};
