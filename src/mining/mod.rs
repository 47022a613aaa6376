//! Mining domain plugin for Delvekeep.
//!
//! The host's physics reports which tiles the player body overlaps each tick
//! (`TileContactEvent`). This domain decides which of those are being dug
//! into, applies the pickaxe, and reports cracks and breaks back out for
//! audio/VFX hooks.

pub mod resolver;

use bevy::prelude::*;
use crate::config::WorldConfig;
use crate::shared::*;
use crate::terrain::TileGrid;

pub use resolver::{strikes_tile, MiningContext, StrikeResult};

pub struct MiningPlugin;

impl Plugin for MiningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>();
        app.init_resource::<TileGrid>();
        app.init_resource::<MovementIntent>();
        app.init_resource::<PlayerBody>();
        app.init_resource::<PlayerResources>();
        app.init_resource::<PlayerProgression>();

        app.add_event::<TileContactEvent>()
            .add_event::<TileDamagedEvent>()
            .add_event::<TileDestroyedEvent>()
            .add_event::<LevelUpEvent>();

        app.add_systems(
            Update,
            resolver::handle_tile_contacts.run_if(in_state(GameState::Playing)),
        );
    }
}
