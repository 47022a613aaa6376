use bevy::prelude::*;

use crate::config::WorldConfig;
use crate::shared::*;

impl PlayerBody {
    /// Update the desired velocity from this tick's intent.
    ///
    /// Each axis with an active intent moves at full `speed` and stores that as
    /// momentum. An idle axis coasts on its momentum, which decays by `decay`
    /// every tick.
    pub fn drive(&mut self, intent: MovementIntent, speed: f32, decay: f32) {
        match intent {
            MovementIntent::Left => {
                self.facing_left = true;
                self.velocity.x = -speed;
                self.momentum.x = -speed;
            }
            MovementIntent::Right => {
                self.facing_left = false;
                self.velocity.x = speed;
                self.momentum.x = speed;
            }
            _ => {
                self.velocity.x = self.momentum.x;
                self.momentum.x *= decay;
            }
        }

        match intent {
            MovementIntent::Up => {
                self.velocity.y = -speed;
                self.momentum.y = -speed;
            }
            MovementIntent::Down => {
                self.velocity.y = speed;
                self.momentum.y = speed;
            }
            _ => {
                self.velocity.y = self.momentum.y;
                self.momentum.y *= decay;
            }
        }
    }
}

/// Core movement system — turns intent and load into the velocity the host
/// physics should apply. While manning the base the player stands still.
pub fn drive_player_velocity(
    intent: Res<MovementIntent>,
    held: Res<PlayerResources>,
    config: Res<WorldConfig>,
    state: Res<State<GameState>>,
    mut body: ResMut<PlayerBody>,
) {
    if *state.get() == GameState::Firing {
        body.velocity = Vec2::ZERO;
        return;
    }

    let speed = held.effective_speed(config.base_speed);
    body.drive(*intent, speed, config.momentum_decay);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_direction_moves_at_full_speed() {
        let mut body = PlayerBody::at(Vec2::ZERO);
        body.drive(MovementIntent::Left, 140.0, 0.5);
        assert_eq!(body.velocity, Vec2::new(-140.0, 0.0));
        assert!(body.facing_left);

        body.drive(MovementIntent::Down, 140.0, 0.5);
        assert_eq!(body.velocity, Vec2::new(-140.0, 140.0));
        assert!(body.facing_left);
    }

    #[test]
    fn released_axis_coasts_and_decays() {
        let mut body = PlayerBody::at(Vec2::ZERO);
        body.drive(MovementIntent::Right, 100.0, 0.5);
        assert!(!body.facing_left);

        body.drive(MovementIntent::None, 100.0, 0.5);
        assert_eq!(body.velocity.x, 100.0);
        body.drive(MovementIntent::None, 100.0, 0.5);
        assert_eq!(body.velocity.x, 50.0);
        body.drive(MovementIntent::None, 100.0, 0.5);
        assert_eq!(body.velocity.x, 25.0);
    }
}
