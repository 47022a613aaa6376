//! Firing mode — manning the base and loosing shots at a target.
//!
//! A press fires one shot immediately and starts a repeating timer aimed at
//! the same spot; a release cancels the timer outright so no further shots
//! fire.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::WorldConfig;
use crate::shared::*;
use super::base::HomeBase;
use super::combat::ShotsInFlight;

/// The active volley, if any.
#[derive(Resource, Debug, Default)]
pub struct Volley {
    timer: Option<Timer>,
    target: Vec2,
}

impl Volley {
    /// Begin firing at `target`. Returns false if a volley is already running.
    pub fn start(&mut self, target: Vec2, interval: Duration) -> bool {
        if self.timer.is_some() {
            return false;
        }
        self.target = target;
        self.timer = Some(Timer::new(interval, TimerMode::Repeating));
        true
    }

    /// Cancel the volley. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        self.timer.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Advance the timer; returns how many follow-up shots are due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick(delta);
                timer.times_finished_this_tick()
            }
            None => 0,
        }
    }
}

/// System: clicking the base toggles firing mode. Entering requires the
/// player to be standing at the base; leaving is always allowed.
pub fn handle_firing_toggle(
    mut events: EventReader<ToggleFiringModeEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    body: Res<PlayerBody>,
    base: Res<HomeBase>,
    config: Res<WorldConfig>,
) {
    let current = *state.get();
    let mut firing = current == GameState::Firing;
    for _ in events.read() {
        if firing {
            firing = false;
        } else if body.position.distance(base.position) < config.player_size {
            firing = true;
        } else {
            debug!("[Defense] Too far from the base to man it");
        }
    }

    let wanted = if firing {
        GameState::Firing
    } else {
        GameState::Playing
    };
    if wanted != current {
        info!("[Defense] {:?} -> {:?}", current, wanted);
        next_state.set(wanted);
    }
}

/// Put one arrow in the air from the base toward `target`.
fn loose_arrow(
    shots: &mut ShotsInFlight,
    config: &WorldConfig,
    origin: Vec2,
    target: Vec2,
    writer: &mut EventWriter<ShotFiredEvent>,
) {
    let shot = shots.launch(Duration::from_secs_f32(config.shot_lifetime_secs));
    writer.send(ShotFiredEvent {
        shot,
        origin,
        target,
    });
}

/// System: pointer press/release while manning the base.
pub fn handle_trigger(
    mut events: EventReader<TriggerEvent>,
    state: Res<State<GameState>>,
    config: Res<WorldConfig>,
    base: Res<HomeBase>,
    mut volley: ResMut<Volley>,
    mut in_flight: ResMut<ShotsInFlight>,
    mut shots: EventWriter<ShotFiredEvent>,
) {
    if *state.get() != GameState::Firing {
        events.clear();
        return;
    }

    for event in events.read() {
        match *event {
            TriggerEvent::Press { target } => {
                let interval = Duration::from_secs_f32(config.shot_interval_secs);
                if volley.start(target, interval) {
                    loose_arrow(&mut in_flight, &config, base.position, target, &mut shots);
                }
            }
            TriggerEvent::Release => {
                volley.stop();
            }
        }
    }
}

/// System: fire the follow-up shots of an active volley.
pub fn tick_volley(
    time: Res<Time>,
    config: Res<WorldConfig>,
    base: Res<HomeBase>,
    mut volley: ResMut<Volley>,
    mut in_flight: ResMut<ShotsInFlight>,
    mut shots: EventWriter<ShotFiredEvent>,
) {
    let due = volley.tick(time.delta());
    for _ in 0..due {
        let target = volley.target();
        loose_arrow(&mut in_flight, &config, base.position, target, &mut shots);
    }
}

/// System: leaving firing mode always cancels the volley.
pub fn cancel_volley(mut volley: ResMut<Volley>) {
    if volley.stop() {
        debug!("[Defense] Volley cancelled on leaving firing mode");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn volley_repeats_on_the_interval() {
        let mut volley = Volley::default();
        assert!(volley.start(Vec2::new(10.0, 20.0), INTERVAL));
        assert_eq!(volley.tick(Duration::from_millis(400)), 0);
        assert_eq!(volley.tick(Duration::from_millis(100)), 1);
        assert_eq!(volley.tick(Duration::from_millis(1000)), 2);
        assert_eq!(volley.target(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn second_press_does_not_restart() {
        let mut volley = Volley::default();
        assert!(volley.start(Vec2::ZERO, INTERVAL));
        volley.tick(Duration::from_millis(300));
        assert!(!volley.start(Vec2::ONE, INTERVAL));
        assert_eq!(volley.target(), Vec2::ZERO);
        assert_eq!(volley.tick(Duration::from_millis(200)), 1);
    }

    #[test]
    fn stop_cancels_future_shots() {
        let mut volley = Volley::default();
        volley.start(Vec2::ZERO, INTERVAL);
        volley.tick(Duration::from_millis(499));
        assert!(volley.stop());
        assert!(!volley.is_active());
        assert_eq!(volley.tick(Duration::from_secs(10)), 0);
        assert!(!volley.stop());
    }
}
