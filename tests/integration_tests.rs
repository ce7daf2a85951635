use assert_matches::assert_matches;
use modstat::*;

fn owner() -> AllyCode {
    AllyCode::parse("299146629").unwrap()
}

fn store_with(characters: Vec<Character>, mods: Vec<Mod>) -> InMemorySnapshotStore {
    let store = InMemorySnapshotStore::new();
    store
        .replace_snapshot(PlayerSnapshot::new(
            Player::placeholder(owner()),
            characters,
            mods,
        ))
        .unwrap();
    store
}

/// Test the documented G13 R7 scenario end to end.
#[test]
fn test_g13_r7_base_score() {
    let anakin = Character::new("ANAKINKNIGHT", 13, 7);
    let base = derive_base_stats(&anakin);
    assert_eq!(base, StatBlock::new(235.0, 2300.0, 23000.0));

    let weights = StatWeights::new()
        .with("speed", 1.0)
        .with("offense", 0.5)
        .with("protection", 0.3);
    let scored = score(&base, &[], &weights);
    assert_eq!(scored.score, 8285.0);
}

/// Test that slot 1 picks the 18-speed mod even when a slower mod scores higher.
#[test]
fn test_speed_only_selection_in_slot_one() {
    let code = owner();
    let pool = vec![
        Mod::unequipped("speed12", code.clone(), ModSlot::Square).with_speed(12.0),
        Mod::unequipped("speed18", code.clone(), ModSlot::Square).with_speed(18.0),
        Mod::unequipped("speed5", code.clone(), ModSlot::Square)
            .with_speed(5.0)
            .with_offense(400.0)
            .with_protection(5000.0),
    ];
    let hero = Character::new("HERO", 13, 7);
    let weights = StatWeights::default();

    let result = allocate(&hero, &pool, &weights);
    assert_eq!(result.mod_in(ModSlot::Square).unwrap().id, "speed18");

    // The slower mod would have scored higher on its own.
    let alternative = score(&derive_base_stats(&hero), &pool[2..], &weights);
    assert!(alternative.score > result.score);
}

/// Test that the optimizer never double-books a slot or steals another character's mod.
#[test]
fn test_one_mod_per_slot_and_no_foreign_mods() {
    let code = owner();
    let mut mods = Vec::new();
    for slot in ModSlot::ALL {
        for n in 0..3 {
            mods.push(
                Mod::unequipped(format!("free-{}-{}", slot, n), code.clone(), slot)
                    .with_speed(f64::from(n)),
            );
        }
        mods.push(
            Mod::equipped(format!("other-{}", slot), code.clone(), "OTHER", slot).with_speed(99.0),
        );
    }
    mods.push(Mod::equipped("hero-square", code.clone(), "HERO", ModSlot::Square).with_speed(50.0));

    let store = store_with(
        vec![Character::new("HERO", 12, 3), Character::new("OTHER", 12, 3)],
        mods,
    );
    let result = optimize(&store, &code, "HERO", &StatWeights::default()).unwrap();

    assert_eq!(result.recommended_mods.len(), 6);
    let mut slots: Vec<ModSlot> = result.recommended_mods.iter().map(|m| m.slot).collect();
    slots.dedup();
    assert_eq!(slots.len(), 6);
    for m in &result.recommended_mods {
        assert!(m.is_candidate_for("HERO"));
        assert_ne!(m.character_id.as_deref(), Some("OTHER"));
    }
    assert_eq!(result.mod_in(ModSlot::Square).unwrap().id, "hero-square");
    assert_eq!(result.mod_in(ModSlot::Cross).unwrap().id, "free-6-2");
}

/// Test that missing slots are simply omitted.
#[test]
fn test_partial_slots() {
    let code = owner();
    let store = store_with(
        vec![Character::new("HERO", 10, 0)],
        vec![
            Mod::unequipped("a", code.clone(), ModSlot::Arrow).with_speed(10.0),
            Mod::unequipped("c", code.clone(), ModSlot::Circle).with_speed(4.0),
        ],
    );
    let result = optimize(&store, &code, "HERO", &StatWeights::default()).unwrap();

    assert_eq!(result.recommended_mods.len(), 2);
    assert!(result.mod_in(ModSlot::Square).is_none());
    assert_eq!(result.final_stats.speed, 150.0 + 14.0);
}

/// Test that an empty pool scores the unmodified base stats.
#[test]
fn test_empty_pool_through_store() {
    let store = store_with(vec![Character::new("ANAKINKNIGHT", 13, 7)], vec![]);
    let result = optimize(&store, &owner(), "ANAKINKNIGHT", &StatWeights::default()).unwrap();

    assert!(result.recommended_mods.is_empty());
    assert_eq!(result.score, 8285.0);
}

/// Test that an unknown character is reported as not found.
#[test]
fn test_unknown_character() {
    let store = store_with(vec![Character::new("HERO", 1, 0)], vec![]);
    assert_matches!(
        optimize(&store, &owner(), "NOBODY", &StatWeights::default()),
        Err(RosterError::NotFound { entity: "character", .. })
    );

    let stranger = AllyCode::parse("987654321").unwrap();
    assert_matches!(
        optimize(&store, &stranger, "HERO", &StatWeights::default()),
        Err(RosterError::NotFound { .. })
    );
}

/// Test that malformed request weights fall back to the defaults.
#[test]
fn test_malformed_weights_recover() {
    let store = store_with(vec![Character::new("ANAKINKNIGHT", 13, 7)], vec![]);
    let request = serde_json::json!({"ally_code": "299146629", "stat_weights": "fast please"});
    let weights = StatWeights::from_json_or_default(request.get("stat_weights"));

    let result = optimize(&store, &owner(), "ANAKINKNIGHT", &weights).unwrap();
    assert_eq!(result.score, 8285.0);
}

/// Test that the configured strategy and default weights drive the optimizer.
#[test]
fn test_optimizer_uses_config() {
    let code = owner();
    let store = store_with(
        vec![Character::new("HERO", 10, 0)],
        vec![
            Mod::unequipped("fast", code.clone(), ModSlot::Diamond).with_speed(18.0),
            Mod::unequipped("strong", code.clone(), ModSlot::Diamond)
                .with_speed(1.0)
                .with_offense(100.0),
        ],
    );
    let config = EngineConfig::from_json_str(
        r#"{"strategy": "greedy_weighted", "default_weights": {"offense": 1.0}}"#,
    )
    .unwrap();
    let optimizer = Optimizer::new(config);

    let result = optimizer
        .optimize(&store, &code, "HERO", &StatWeights::new())
        .unwrap();
    assert_eq!(result.recommended_mods[0].id, "strong");
    assert_eq!(result.score, 2000.0 + 100.0);
}

/// Test that roster-wide optimization handles each character independently.
#[test]
fn test_optimize_roster() {
    let code = owner();
    let store = store_with(
        vec![Character::new("A", 10, 0), Character::new("B", 12, 2)],
        vec![
            Mod::unequipped("free", code.clone(), ModSlot::Square).with_speed(10.0),
            Mod::equipped("b-square", code.clone(), "B", ModSlot::Square).with_speed(20.0),
        ],
    );
    let results = optimize_roster(&store, &code, &StatWeights::default()).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].character.base_id, "A");
    assert_eq!(results[0].recommended_mods[0].id, "free");
    assert_eq!(results[1].character.base_id, "B");
    assert_eq!(results[1].recommended_mods[0].id, "b-square");
}

/// Test the 12-character and 7-character comparison scenarios.
#[test]
fn test_compare_players() {
    let a = AllyCode::parse("111111111").unwrap();
    let b = AllyCode::parse("222222222").unwrap();
    let store = InMemorySnapshotStore::new();

    let roster_a: Vec<Character> = (0..12u64)
        .map(|i| Character::new(format!("A{}", i), 12, 3).with_galactic_power(10_000 + i * 1_000))
        .collect();
    let roster_b: Vec<Character> = (0..7u64)
        .map(|i| Character::new(format!("B{}", i), 13, 8).with_galactic_power(40_000))
        .collect();

    store
        .replace_snapshot(PlayerSnapshot::new(Player::placeholder(a.clone()), roster_a, vec![]))
        .unwrap();
    store
        .replace_snapshot(PlayerSnapshot::new(Player::placeholder(b.clone()), roster_b, vec![]))
        .unwrap();

    let report = compare_players(&store, &a, &b).unwrap();
    assert_eq!(report.players.len(), 2);
    assert_eq!(report.players[0].ally_code, a);

    let comparison = report.comparison();
    assert_eq!(comparison.count_a, 12);
    assert_eq!(comparison.avg_gear_a, 12.0);
    assert_eq!(comparison.avg_relic_a, 3.0);
    // top ten of 10k..=21k skips 10k and 11k
    assert_eq!(comparison.top10_gp_sum_a, (12..=21u64).map(|k| k * 1_000).sum::<u64>());

    assert_eq!(comparison.count_b, 7);
    assert_eq!(comparison.avg_relic_b, 8.0);
    assert_eq!(comparison.top10_gp_sum_b, 0);
}

/// Test comparing players missing from the store.
#[test]
fn test_compare_unknown_players() {
    let store = InMemorySnapshotStore::new();
    let a = AllyCode::parse("111111111").unwrap();
    let b = AllyCode::parse("222222222").unwrap();

    let report = compare_players(&store, &a, &b).unwrap();
    assert!(report.players.is_empty());
    assert_eq!(report.comparison(), Comparison::default());
}

/// Test that a custom top-N changes only the power sum.
#[test]
fn test_compare_with_custom_top_n() {
    let a = AllyCode::parse("111111111").unwrap();
    let store = InMemorySnapshotStore::new();
    let roster: Vec<Character> = (1..=7u64)
        .map(|i| Character::new(format!("C{}", i), 11, 0).with_galactic_power(i))
        .collect();
    store
        .replace_snapshot(PlayerSnapshot::new(Player::placeholder(a.clone()), roster, vec![]))
        .unwrap();

    let report = compare_players_with(&store, &a, &a, 5).unwrap();
    assert_eq!(report.stats.player1.top_gp, 7 + 6 + 5 + 4 + 3);
    assert_eq!(report.stats.player1.total_characters, 7);
}

/// Test that the optimizer compares rosters over its configured top-N.
#[test]
fn test_optimizer_compares_with_configured_top_n() {
    let a = AllyCode::parse("111111111").unwrap();
    let store = InMemorySnapshotStore::new();
    let roster: Vec<Character> = (1..=7u64)
        .map(|i| Character::new(format!("C{}", i), 11, 0).with_galactic_power(i))
        .collect();
    store
        .replace_snapshot(PlayerSnapshot::new(Player::placeholder(a.clone()), roster, vec![]))
        .unwrap();

    let default = Optimizer::default().compare_players(&store, &a, &a).unwrap();
    assert_eq!(default.stats.player1.top_gp, 0);

    let config = EngineConfig::from_json_str(r#"{"top_n": 3}"#).unwrap();
    let report = Optimizer::new(config).compare_players(&store, &a, &a).unwrap();
    assert_eq!(report.stats.player1.top_gp, 7 + 6 + 5);
    assert_eq!(report.stats.player2.top_gp, 7 + 6 + 5);
}
