use tile_schema::{TileTable, TileType};

use crate::rng::RandomSource;

/// Picks a tile type by walking the cumulative spawn weights in
/// [`TileType::ALL`] order.
///
/// The first type whose running total reaches the sampled value wins. Weights
/// are not renormalised: when they sum to less than one the remainder falls
/// through to the default type, and when they sum to more the types at the
/// end of the order lose the excess.
pub fn pick_tile_type(table: &TileTable, rng: &mut impl RandomSource) -> TileType {
    let roll = rng.unit();
    let mut cumulative = 0.0;
    for tile in table.iter() {
        cumulative += tile.spawn_rate;
        if roll <= cumulative {
            return tile.kind;
        }
    }
    TileType::Normal
}

/// Uniform lane index in `0..lane_count`.
pub fn pick_lane(lane_count: usize, rng: &mut impl RandomSource) -> usize {
    rng.below(lane_count.max(1))
}

/// Probability of each type under [`pick_tile_type`] for a uniform roll.
pub fn effective_rates(table: &TileTable) -> Vec<(TileType, f64)> {
    let mut out = Vec::new();
    let mut cumulative: f64 = 0.0;
    let mut fallthrough = 1.0;
    for tile in table.iter() {
        let lo = cumulative.min(1.0);
        cumulative += tile.spawn_rate;
        let hi = cumulative.min(1.0);
        let p = (hi - lo).max(0.0);
        fallthrough -= p;
        out.push((tile.kind, p));
    }
    if fallthrough > 0.0 {
        if let Some(entry) = out.iter_mut().find(|(k, _)| k.is_default()) {
            entry.1 += fallthrough;
        } else {
            out.push((TileType::Normal, fallthrough));
        }
    }
    out
}
