//! Defense domain plugin for Delvekeep.
//!
//! Provides:
//! - Firing mode toggle at the home base
//! - A cancellable repeating volley while the trigger is held
//! - The long-period enemy wave schedule
//! - Enemy hit points and arrow lifetimes
//! - Home base health and game over
//!
//! None of this touches the tile grid; it shares only the frame schedule
//! with mining.

pub mod base;
pub mod combat;
pub mod firing;
pub mod waves;

use bevy::prelude::*;
use crate::config::WorldConfig;
use crate::shared::*;

pub use base::HomeBase;
pub use combat::{Enemies, HitOutcome, ShotsInFlight};
pub use firing::Volley;
pub use waves::WaveSchedule;

pub struct DefensePlugin;

impl Plugin for DefensePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>();
        app.init_resource::<PlayerBody>();
        app.init_resource::<HomeBase>();
        app.init_resource::<Volley>();
        app.init_resource::<WaveSchedule>();
        app.init_resource::<Enemies>();
        app.init_resource::<ShotsInFlight>();

        app.add_event::<ToggleFiringModeEvent>()
            .add_event::<TriggerEvent>()
            .add_event::<BaseHitEvent>()
            .add_event::<ShotFiredEvent>()
            .add_event::<ShotHitEvent>()
            .add_event::<ShotExpiredEvent>()
            .add_event::<EnemySlainEvent>()
            .add_event::<WaveSpawnEvent>()
            .add_event::<BaseDestroyedEvent>();

        app.add_systems(OnEnter(GameState::Playing), waves::open_first_wave);
        app.add_systems(OnExit(GameState::Firing), firing::cancel_volley);

        app.add_systems(
            Update,
            (
                firing::handle_firing_toggle,
                (firing::handle_trigger, firing::tick_volley).chain(),
                (combat::handle_shot_hits, combat::tick_shots)
                    .chain()
                    .after(firing::tick_volley),
                waves::tick_waves,
                base::handle_base_hits.after(firing::handle_firing_toggle),
            )
                .run_if(in_gameplay),
        );
    }
}
