//! Delvekeep — the game core of a side-view mining and base-defence game.
//!
//! The library holds the destructible terrain engine, the mining resolver,
//! the resource ledger, and the defence timers as Bevy plugins. Rendering,
//! physics, and enemy behaviour belong to the host application, which feeds
//! contacts and input in as events and reads the grid and ledger back out.

pub mod shared;
pub mod config;
pub mod terrain;
pub mod player;
pub mod mining;
pub mod ledger;
pub mod defense;

use bevy::prelude::*;
use shared::*;

/// Registers the game state, shared resources and events, and every domain
/// plugin. Insert a custom `WorldConfig` before adding this to override the
/// defaults.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>();
        app.init_resource::<config::WorldConfig>();

        app.add_plugins(terrain::TerrainPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(mining::MiningPlugin)
            .add_plugins(ledger::LedgerPlugin)
            .add_plugins(defense::DefensePlugin);
    }
}
