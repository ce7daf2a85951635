//! Optimize example: ingest a roster and pick mods for one character
//!
//! This example demonstrates:
//! - Normalizing a fetched player payload
//! - Storing it in the in-memory snapshot store
//! - Running the greedy-by-speed optimizer and the weighted alternative
//!
//! Run with `RUST_LOG=modstat=debug` to see per-slot selections.

use modstat::*;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modstat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let owner = AllyCode::parse("299-146-629")?;

    // Start from the demo roster and add a pool of free mods.
    let mut snapshot = PlayerSnapshot::demo(&owner)?;
    let free = [
        (ModSlot::Square, 12.0, 0.0, 0.0),
        (ModSlot::Square, 18.0, 0.0, 0.0),
        (ModSlot::Square, 5.0, 120.0, 2000.0),
        (ModSlot::Arrow, 30.0, 0.0, 0.0),
        (ModSlot::Diamond, 9.0, 40.0, 0.0),
        (ModSlot::Circle, 4.0, 0.0, 900.0),
    ];
    for (n, (slot, speed, offense, protection)) in free.into_iter().enumerate() {
        snapshot.mods.push(
            Mod::unequipped(format!("free-{}", n), owner.clone(), slot)
                .with_speed(speed)
                .with_offense(offense)
                .with_protection(protection),
        );
    }

    let store = InMemorySnapshotStore::new();
    store.replace_snapshot(snapshot)?;

    let request = json!({
        "character_id": "ANAKINKNIGHT",
        "stat_weights": {"speed": 1.0, "protection": 0.5}
    });
    let weights = StatWeights::from_json_or_default(request.get("stat_weights"));

    let greedy = optimize(&store, &owner, "ANAKINKNIGHT", &weights)?;
    println!("=== Greedy by speed ===");
    println!("{}", serde_json::to_string_pretty(&greedy)?);

    let weighted = Optimizer::new(EngineConfig {
        strategy: SelectionStrategy::GreedyWeighted,
        ..EngineConfig::default()
    })
    .optimize(&store, &owner, "ANAKINKNIGHT", &weights)?;

    println!("\n=== Slot comparison ===");
    for slot in ModSlot::ALL {
        let pick = |o: &Optimization| {
            o.mod_in(slot)
                .map(|m| m.id.clone())
                .unwrap_or_else(|| "-".into())
        };
        println!(
            "  {:<8} speed: {:<8} weighted: {}",
            slot.shape(),
            pick(&greedy),
            pick(&weighted)
        );
    }
    println!(
        "\nScore: {:.1} (greedy) vs {:.1} (weighted)",
        greedy.score, weighted.score
    );

    Ok(())
}
