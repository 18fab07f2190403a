use tile_core::gameplay::spawner::{effective_rates, pick_lane, pick_tile_type};
use tile_core::rng::SequenceRandom;
use tile_schema::{TileTable, TileType};

fn pick(table: &TileTable, roll: f64) -> TileType {
    pick_tile_type(table, &mut SequenceRandom::new(vec![roll]))
}

#[test]
fn test_cumulative_boundaries_pick_in_table_order() {
    let table = TileTable::default();
    assert_eq!(pick(&table, 0.0), TileType::Normal);
    assert_eq!(pick(&table, 0.7), TileType::Normal);
    assert_eq!(pick(&table, 0.75), TileType::Fire);
    assert_eq!(pick(&table, 0.82), TileType::Ice);
    assert_eq!(pick(&table, 0.88), TileType::Teleport);
    assert_eq!(pick(&table, 0.95), TileType::Hint);
    assert_eq!(pick(&table, 0.99), TileType::Shuffle);
}

#[test]
fn test_stock_weights_starve_last_types() {
    // The stock weights sum past one, so freeze and swap are never reached.
    let table = TileTable::default();
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..5_000 {
        let kind = pick_tile_type(&table, &mut rng);
        assert_ne!(kind, TileType::Freeze);
        assert_ne!(kind, TileType::Swap);
    }

    let rates = effective_rates(&table);
    let rate = |kind: TileType| rates.iter().find(|(k, _)| *k == kind).unwrap().1;
    assert_eq!(rate(TileType::Freeze), 0.0);
    assert_eq!(rate(TileType::Swap), 0.0);
    assert!((rate(TileType::Shuffle) - 0.02).abs() < 1e-9);
    let total: f64 = rates.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_short_weights_fall_through_to_normal() {
    let mut table = TileTable::default();
    for tile in &mut table.tiles {
        tile.spawn_rate = if tile.kind == TileType::Fire { 0.2 } else { 0.0 };
    }
    assert_eq!(pick(&table, 0.1), TileType::Fire);
    assert_eq!(pick(&table, 0.5), TileType::Normal);

    let rates = effective_rates(&table);
    let normal = rates.iter().find(|(k, _)| *k == TileType::Normal).unwrap().1;
    assert!((normal - 0.8).abs() < 1e-9);
}

#[test]
fn test_seeded_distribution_tracks_weights() {
    let table = TileTable::default();
    let mut rng = fastrand::Rng::with_seed(2024);
    let draws = 20_000;
    let normals = (0..draws)
        .filter(|_| pick_tile_type(&table, &mut rng) == TileType::Normal)
        .count();
    let share = normals as f64 / draws as f64;
    assert!((share - 0.7).abs() < 0.02, "normal share was {share}");
}

#[test]
fn test_lanes_are_uniform_indices() {
    let mut rng = SequenceRandom::new(vec![0.0, 0.26, 0.5, 0.99]);
    let lanes: Vec<usize> = (0..4).map(|_| pick_lane(4, &mut rng)).collect();
    assert_eq!(lanes, vec![0, 1, 2, 3]);

    let mut rng = fastrand::Rng::with_seed(1);
    assert!((0..1_000).all(|_| pick_lane(4, &mut rng) < 4));
}
