//! The home structure the player defends and deposits at.

use bevy::prelude::*;

use crate::config::WorldConfig;
use crate::shared::*;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HomeBase {
    pub position: Vec2,
    pub health: u32,
    pub max_health: u32,
}

impl HomeBase {
    pub fn new(position: Vec2, health: u32) -> Self {
        Self {
            position,
            health,
            max_health: health,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Apply a hit. Returns true only on the hit that brings the base down.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.is_destroyed()
    }
}

impl FromWorld for HomeBase {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<WorldConfig>()
            .cloned()
            .unwrap_or_default();
        Self::new(config.base_position(), config.base_health)
    }
}

/// System: enemies hitting the base. The first hit that empties it ends the
/// game.
pub fn handle_base_hits(
    mut events: EventReader<BaseHitEvent>,
    mut base: ResMut<HomeBase>,
    mut next_state: ResMut<NextState<GameState>>,
    mut destroyed_events: EventWriter<BaseDestroyedEvent>,
) {
    for ev in events.read() {
        if base.take_damage(ev.damage) {
            warn!("[Defense] The base has fallen");
            destroyed_events.send(BaseDestroyedEvent);
            next_state.set(GameState::GameOver);
        }
    }
}
