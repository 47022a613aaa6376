//! Enemy hit points and the arrows in flight.
//!
//! The host moves enemies and arrows and reports when an arrow reaches an
//! enemy. This module keeps the numbers: which enemies are alive and how
//! hurt they are, and which arrows are still live.

use bevy::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::WorldConfig;
use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub health: u32,
    pub max_health: u32,
}

/// What one hit did to an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// No such enemy (already slain, or never spawned).
    Unknown,
    Wounded { remaining: u32 },
    Slain,
}

/// Every enemy currently alive.
#[derive(Resource, Debug, Default)]
pub struct Enemies {
    alive: BTreeMap<EnemyId, Enemy>,
    next_id: u32,
}

impl Enemies {
    pub fn spawn(&mut self, health: u32) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.alive.insert(
            id,
            Enemy {
                health,
                max_health: health,
            },
        );
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.alive.get(&id)
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Health saturates at zero; an enemy at zero is removed.
    pub fn take_damage(&mut self, id: EnemyId, amount: u32) -> HitOutcome {
        let Some(enemy) = self.alive.get_mut(&id) else {
            return HitOutcome::Unknown;
        };
        enemy.health = enemy.health.saturating_sub(amount);
        if enemy.health > 0 {
            return HitOutcome::Wounded {
                remaining: enemy.health,
            };
        }
        self.alive.remove(&id);
        HitOutcome::Slain
    }
}

/// Arrows that can still hit something, each with its remaining lifetime.
#[derive(Resource, Debug, Default)]
pub struct ShotsInFlight {
    live: BTreeMap<ShotId, Timer>,
    next_id: u32,
}

impl ShotsInFlight {
    pub fn launch(&mut self, lifetime: Duration) -> ShotId {
        let id = ShotId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, Timer::new(lifetime, TimerMode::Once));
        id
    }

    pub fn is_live(&self, id: ShotId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// An arrow that hits is used up. Returns false if it was already spent.
    pub fn land(&mut self, id: ShotId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Advance every arrow; returns the ones that just ran out, in id order.
    pub fn tick(&mut self, delta: Duration) -> Vec<ShotId> {
        let mut expired = Vec::new();
        for (id, timer) in self.live.iter_mut() {
            timer.tick(delta);
            if timer.finished() {
                expired.push(*id);
            }
        }
        for id in &expired {
            self.live.remove(id);
        }
        expired
    }
}

pub fn tick_shots(
    time: Res<Time>,
    mut shots: ResMut<ShotsInFlight>,
    mut expired_events: EventWriter<ShotExpiredEvent>,
) {
    for shot in shots.tick(time.delta()) {
        expired_events.send(ShotExpiredEvent { shot });
    }
}

/// System: arrows reaching enemies. Each live arrow deals `shot_damage` once.
pub fn handle_shot_hits(
    mut events: EventReader<ShotHitEvent>,
    config: Res<WorldConfig>,
    mut shots: ResMut<ShotsInFlight>,
    mut enemies: ResMut<Enemies>,
    mut slain_events: EventWriter<EnemySlainEvent>,
) {
    for hit in events.read() {
        if !shots.land(hit.shot) {
            continue;
        }
        match enemies.take_damage(hit.enemy, config.shot_damage) {
            HitOutcome::Unknown => {}
            HitOutcome::Wounded { remaining } => {
                debug!("[Defense] Enemy {} hit, {} HP left", hit.enemy.0, remaining);
            }
            HitOutcome::Slain => {
                info!("[Defense] Enemy {} slain", hit.enemy.0);
                slain_events.send(EnemySlainEvent { enemy: hit.enemy });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_arrows_slay_a_fresh_enemy() {
        let mut enemies = Enemies::default();
        let orc = enemies.spawn(100);
        assert_eq!(enemies.take_damage(orc, 50), HitOutcome::Wounded { remaining: 50 });
        assert_eq!(enemies.take_damage(orc, 50), HitOutcome::Slain);
        assert!(enemies.is_empty());
        assert_eq!(enemies.take_damage(orc, 50), HitOutcome::Unknown);
    }

    #[test]
    fn overkill_clamps_at_zero() {
        let mut enemies = Enemies::default();
        let orc = enemies.spawn(30);
        assert_eq!(enemies.take_damage(orc, 500), HitOutcome::Slain);
        assert_eq!(enemies.get(orc), None);
    }

    #[test]
    fn enemy_ids_are_never_reused() {
        let mut enemies = Enemies::default();
        let first = enemies.spawn(10);
        enemies.take_damage(first, 10);
        let second = enemies.spawn(10);
        assert_ne!(first, second);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn arrows_expire_after_their_lifetime() {
        let mut shots = ShotsInFlight::default();
        let early = shots.launch(Duration::from_millis(1000));
        shots.tick(Duration::from_millis(400));
        let late = shots.launch(Duration::from_millis(1000));

        assert!(shots.tick(Duration::from_millis(599)).is_empty());
        assert_eq!(shots.tick(Duration::from_millis(1)), vec![early]);
        assert!(!shots.is_live(early));
        assert!(shots.is_live(late));
        assert_eq!(shots.tick(Duration::from_millis(400)), vec![late]);
        assert!(shots.is_empty());
    }

    #[test]
    fn an_arrow_lands_only_once() {
        let mut shots = ShotsInFlight::default();
        let arrow = shots.launch(Duration::from_secs(1));
        assert!(shots.land(arrow));
        assert!(!shots.land(arrow));
        assert!(shots.tick(Duration::from_secs(5)).is_empty());
    }
}
