//! Compare example: head-to-head roster summary of two players
//!
//! This example demonstrates:
//! - Loading an engine configuration
//! - Comparing two stored rosters
//! - The top-N galactic power rule for small rosters

use modstat::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn roster(prefix: &str, count: u64, gear: u32, relic: u32) -> Vec<Character> {
    (0..count)
        .map(|i| {
            Character::new(format!("{}{}", prefix, i), gear, relic)
                .with_name(format!("{} #{}", prefix, i))
                .with_galactic_power(20_000 + i * 1_500)
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modstat=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_json_str(r#"{"top_n": 10}"#)?;

    let store = InMemorySnapshotStore::new();
    let veteran = AllyCode::parse("111-222-333")?;
    let newcomer = AllyCode::parse("444-555-666")?;

    store.replace_snapshot(PlayerSnapshot::new(
        Player::placeholder(veteran.clone()),
        roster("VET", 12, 12, 3),
        vec![],
    ))?;
    store.replace_snapshot(PlayerSnapshot::new(
        Player::placeholder(newcomer.clone()),
        roster("NEW", 7, 11, 0),
        vec![],
    ))?;

    let report = Optimizer::new(config.clone()).compare_players(&store, &veteran, &newcomer)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let flat = report.comparison();
    println!("\n=== Head to head ===");
    println!("  characters:   {} vs {}", flat.count_a, flat.count_b);
    println!("  average gear: {:.1} vs {:.1}", flat.avg_gear_a, flat.avg_gear_b);
    println!("  average relic: {:.1} vs {:.1}", flat.avg_relic_a, flat.avg_relic_b);
    println!("  top {} GP:    {} vs {}", config.top_n, flat.top10_gp_sum_a, flat.top10_gp_sum_b);
    if flat.count_b < config.top_n {
        println!("  (fewer than {} characters: top GP reported as 0)", config.top_n);
    }

    Ok(())
}
