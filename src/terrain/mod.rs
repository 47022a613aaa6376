//! Terrain domain plugin for Delvekeep.
//!
//! Provides:
//! - The sparse tile grid and per-tile health state machine
//! - One-shot procedural generation (crust, entry shaft, ore clusters)
//! - Exposure decorations recomputed around every mined-out tile

pub mod decoration;
pub mod generation;
pub mod grid;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::WorldConfig;
use crate::shared::*;
use generation::{generate_grid, GenerationParams};

pub use grid::{Corner, DamageOutcome, Decoration, Rock, Side, Tile, TileGrid, TileKind, TileState, TileYield};

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>();
        app.init_resource::<TileGrid>();

        app.add_systems(OnEnter(GameState::Loading), generate_world);
    }
}

/// Build the grid from the active config, then hand over to `Playing`.
/// Nothing is mined before this has run.
pub fn generate_world(
    config: Res<WorldConfig>,
    mut grid: ResMut<TileGrid>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let params = GenerationParams::from_config(&config);
    *grid = generate_grid(&params, &mut rng);

    info!(
        "[Terrain] Generated {}x{} grid: {} tiles, {} ore clusters, shaft at columns {:?}",
        grid.columns(),
        grid.rows(),
        grid.len(),
        grid.ore_seeds().len(),
        params.shaft_columns
    );
    next_state.set(GameState::Playing);
}
