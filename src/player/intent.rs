//! Movement intent — the one place raw input becomes a direction.
//!
//! Keyboard state wins when any direction key is held; otherwise the virtual
//! joystick's drag angle is bucketed into a direction. Mining and movement
//! both read the resolved `MovementIntent` resource.

use bevy::prelude::*;

use crate::shared::*;

/// Last drag angle reported by the on-screen joystick, if a drag is active.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualJoystick {
    pub drag_angle: Option<f32>,
}

impl MovementIntent {
    /// Bucket a joystick angle (radians, screen space, positive = downward).
    /// Ranges are checked in order; anything between buckets is a dead zone.
    pub fn from_angle(angle: f32) -> Self {
        if angle <= -1.2 {
            MovementIntent::Up
        } else if angle <= -2.5 || angle >= 2.5 {
            MovementIntent::Left
        } else if (-0.05..=1.0).contains(&angle) {
            MovementIntent::Right
        } else if (1.2..=1.7).contains(&angle) {
            MovementIntent::Down
        } else {
            MovementIntent::None
        }
    }

    /// Direction keys map straight through. `None` when no direction key is
    /// held, so the caller can fall back to another source.
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Option<Self> {
        let held = |a: KeyCode, b: KeyCode| keys.pressed(a) || keys.pressed(b);

        if held(KeyCode::ArrowLeft, KeyCode::KeyA) {
            Some(MovementIntent::Left)
        } else if held(KeyCode::ArrowRight, KeyCode::KeyD) {
            Some(MovementIntent::Right)
        } else if held(KeyCode::ArrowDown, KeyCode::KeyS) {
            Some(MovementIntent::Down)
        } else if held(KeyCode::ArrowUp, KeyCode::KeyW) {
            Some(MovementIntent::Up)
        } else {
            None
        }
    }
}

pub fn apply_joystick_events(
    mut events: EventReader<JoystickEvent>,
    mut joystick: ResMut<VirtualJoystick>,
) {
    for event in events.read() {
        joystick.drag_angle = match *event {
            JoystickEvent::Drag { angle } => Some(angle),
            JoystickEvent::Release => None,
        };
    }
}

/// Leaving firing mode drops any drag still held from before, so the player
/// does not set off again on their own.
pub fn release_joystick(mut joystick: ResMut<VirtualJoystick>) {
    joystick.drag_angle = None;
}

/// Resolve this tick's intent. Outside `Playing` the player is not moving.
pub fn resolve_movement_intent(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    joystick: Res<VirtualJoystick>,
    state: Res<State<GameState>>,
    mut intent: ResMut<MovementIntent>,
) {
    let resolved = if *state.get() != GameState::Playing {
        MovementIntent::None
    } else {
        keys.as_deref()
            .and_then(MovementIntent::from_keys)
            .or_else(|| joystick.drag_angle.map(MovementIntent::from_angle))
            .unwrap_or_default()
    };

    if *intent != resolved {
        *intent = resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_buckets() {
        assert_eq!(MovementIntent::from_angle(-1.57), MovementIntent::Up);
        assert_eq!(MovementIntent::from_angle(-1.2), MovementIntent::Up);
        assert_eq!(MovementIntent::from_angle(3.1), MovementIntent::Left);
        assert_eq!(MovementIntent::from_angle(2.5), MovementIntent::Left);
        assert_eq!(MovementIntent::from_angle(0.0), MovementIntent::Right);
        assert_eq!(MovementIntent::from_angle(-0.05), MovementIntent::Right);
        assert_eq!(MovementIntent::from_angle(1.0), MovementIntent::Right);
        assert_eq!(MovementIntent::from_angle(1.57), MovementIntent::Down);
    }

    #[test]
    fn up_bucket_is_checked_before_left() {
        // Pointing up-left past -2.5 still reads as up.
        assert_eq!(MovementIntent::from_angle(-3.0), MovementIntent::Up);
    }

    #[test]
    fn gaps_between_buckets_are_dead_zones() {
        for angle in [-0.5, 1.1, 2.0, -0.1] {
            assert_eq!(MovementIntent::from_angle(angle), MovementIntent::None, "{angle}");
        }
    }

    #[test]
    fn keys_map_directly() {
        let mut keys = ButtonInput::<KeyCode>::default();
        assert_eq!(MovementIntent::from_keys(&keys), None);

        keys.press(KeyCode::ArrowDown);
        assert_eq!(MovementIntent::from_keys(&keys), Some(MovementIntent::Down));

        keys.press(KeyCode::KeyA);
        assert_eq!(MovementIntent::from_keys(&keys), Some(MovementIntent::Left));

        keys.release(KeyCode::KeyA);
        keys.release(KeyCode::ArrowDown);
        keys.press(KeyCode::KeyW);
        assert_eq!(MovementIntent::from_keys(&keys), Some(MovementIntent::Up));
    }
}
