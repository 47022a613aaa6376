//! Procedural rock grid generation.
//!
//! The grid is built once per scene, column by column from the left and top to
//! bottom within each column. Row 0 is an indestructible crust. A shaft of
//! open columns is cut through the crust and the row beneath it so the player
//! can reach the rock. Below that, every cell is stone or ore, with health
//! rising in tiers as the rock gets deeper.

use rand::Rng;
use std::collections::HashSet;
use std::ops::Range;

use crate::config::WorldConfig;
use crate::shared::*;
use super::decoration::redecorate_neighbors;
use super::grid::{Tile, TileGrid};

/// Extra health an ore tile gets on top of its depth tier.
pub const ORE_HEALTH_BONUS: u32 = 50;

/// Row of the lining cells directly beneath the open shaft. Everything above
/// it in the shaft columns is left open.
///
/// The lining's edge overlay faces the vacancy it borders, which is the open
/// shaft above, so it is `Edge(Side::Up)`. It comes out of the same
/// neighbour rule as every other overlay rather than being hard-coded.
pub const LINING_ROW: i32 = 2;

/// Everything the generator needs to know about the world layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub columns: i32,
    pub rows: i32,
    pub shaft_columns: Range<i32>,
    pub ore_roll_threshold: u32,
    /// Depth ratio of row 0 and the per-row increment.
    pub depth_origin: f32,
    pub depth_step: f32,
}

impl GenerationParams {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            columns: config.columns(),
            rows: config.rows(),
            shaft_columns: config.shaft_columns(),
            ore_roll_threshold: config.ore_roll_threshold,
            depth_origin: config.depth_ratio(0),
            depth_step: config.tile_size / config.world_height,
        }
    }

    pub fn depth_ratio(&self, row: i32) -> f32 {
        self.depth_origin + row as f32 * self.depth_step
    }

    fn in_shaft(&self, col: i32) -> bool {
        self.shaft_columns.contains(&col)
    }

    fn in_bounds(&self, coord: TileCoord) -> bool {
        (0..self.columns).contains(&coord.col) && (0..self.rows).contains(&coord.row)
    }
}

/// Base rock health for a given depth ratio. The deepest matching tier wins.
pub fn health_tier(depth_ratio: f32) -> u32 {
    if depth_ratio > 0.7 {
        200
    } else if depth_ratio > 0.5 {
        150
    } else if depth_ratio > 0.3 {
        100
    } else {
        50
    }
}

/// Build the initial grid. Deterministic for a given RNG stream: each rock
/// cell draws its ore roll and then its yield, in that order.
pub fn generate_grid(params: &GenerationParams, rng: &mut impl Rng) -> TileGrid {
    let mut grid = TileGrid::new(params.columns, params.rows);
    let mut ore_flags: HashSet<TileCoord> = HashSet::new();

    for col in 0..params.columns {
        for row in 0..params.rows {
            let coord = TileCoord::new(col, row);

            if row == 0 {
                if !params.in_shaft(col) {
                    grid.insert(coord, Tile::static_ground());
                }
                continue;
            }
            if row == 1 && params.in_shaft(col) {
                continue;
            }

            let tier = health_tier(params.depth_ratio(row));
            let roll: u32 = rng.gen_range(0..=100);
            let yield_amount: u32 = rng.gen_range(0..=2);

            let flagged = ore_flags.contains(&coord);
            if flagged || roll > params.ore_roll_threshold {
                if !flagged {
                    grid.record_ore_seed(coord);
                    for (dc, dr) in [(0, 1), (1, 0), (1, 1)] {
                        let member = coord.offset(dc, dr);
                        if params.in_bounds(member) {
                            ore_flags.insert(member);
                        }
                    }
                }
                grid.insert(
                    coord,
                    Tile::rock(Material::Iron, tier + ORE_HEALTH_BONUS, yield_amount),
                );
                continue;
            }

            grid.insert(coord, Tile::rock(Material::Stone, tier, yield_amount));
        }
    }

    // Every rock bordering the open shaft, the lining included, starts
    // exposed and decorated.
    for col in params.shaft_columns.clone() {
        for row in 0..LINING_ROW {
            redecorate_neighbors(&mut grid, TileCoord::new(col, row));
        }
    }

    grid
}
