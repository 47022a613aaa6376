//! Enemy wave schedule. One wave arrives as soon as play starts, then one
//! every `wave_interval_secs` for the rest of the scene. Enemy behaviour
//! itself belongs to the host; this only says when a wave is due.

use bevy::prelude::*;
use std::time::Duration;

use crate::config::WorldConfig;
use crate::shared::*;
use super::combat::Enemies;

#[derive(Resource, Debug)]
pub struct WaveSchedule {
    timer: Timer,
    waves_sent: u32,
}

impl WaveSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            waves_sent: 0,
        }
    }

    pub fn waves_sent(&self) -> u32 {
        self.waves_sent
    }

    /// Record a new wave and return its number (1-based).
    pub fn launch(&mut self) -> u32 {
        self.waves_sent += 1;
        self.waves_sent
    }

    /// Advance the clock; returns how many waves came due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

impl FromWorld for WaveSchedule {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<WorldConfig>()
            .map(|c| c.wave_interval_secs)
            .unwrap_or(WorldConfig::default().wave_interval_secs);
        Self::new(Duration::from_secs_f32(interval))
    }
}

/// Start the next wave: one fresh enemy at the spawn point.
fn send_wave(
    schedule: &mut WaveSchedule,
    enemies: &mut Enemies,
    config: &WorldConfig,
    waves: &mut EventWriter<WaveSpawnEvent>,
) {
    let wave = schedule.launch();
    let enemy = enemies.spawn(config.enemy_health);
    info!("[Defense] Wave {} incoming ({} enemies alive)", wave, enemies.len());
    waves.send(WaveSpawnEvent {
        wave,
        enemy,
        position: config.enemy_spawn(),
        health: config.enemy_health,
    });
}

/// System: the opening wave, sent the first time play begins.
pub fn open_first_wave(
    config: Res<WorldConfig>,
    mut schedule: ResMut<WaveSchedule>,
    mut enemies: ResMut<Enemies>,
    mut waves: EventWriter<WaveSpawnEvent>,
) {
    if schedule.waves_sent() > 0 {
        return;
    }
    send_wave(&mut schedule, &mut enemies, &config, &mut waves);
}

pub fn tick_waves(
    time: Res<Time>,
    config: Res<WorldConfig>,
    mut schedule: ResMut<WaveSchedule>,
    mut enemies: ResMut<Enemies>,
    mut waves: EventWriter<WaveSpawnEvent>,
) {
    let due = schedule.tick(time.delta());
    for _ in 0..due {
        send_wave(&mut schedule, &mut enemies, &config, &mut waves);
    }
}
