//! Player domain plugin for Delvekeep.
//!
//! Provides:
//! - Movement intent from keyboard or the virtual joystick
//! - Desired velocity with momentum, slowed by the load being hauled

pub mod intent;
pub mod movement;

use bevy::prelude::*;
use crate::config::WorldConfig;
use crate::shared::*;

pub use intent::VirtualJoystick;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldConfig>();
        app.init_resource::<MovementIntent>();
        app.init_resource::<VirtualJoystick>();
        app.init_resource::<PlayerBody>();
        app.init_resource::<PlayerResources>();
        app.add_event::<JoystickEvent>();

        // Intent is settled before anything in Update reads it.
        app.add_systems(
            PreUpdate,
            (intent::apply_joystick_events, intent::resolve_movement_intent)
                .chain()
                .after(bevy::input::InputSystem)
                .run_if(in_gameplay),
        );

        app.add_systems(OnExit(GameState::Firing), intent::release_joystick);

        app.add_systems(
            Update,
            movement::drive_player_velocity.run_if(in_gameplay),
        );
    }
}
