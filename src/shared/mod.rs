//! Shared components, resources, events, and states for Delvekeep.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains talk to each other through these events and resources; the only
//! direct cross-domain import is the terrain grid, which mining drives.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    /// World generation runs on entry; nothing is mined until it finishes.
    #[default]
    Loading,
    /// Digging, hauling, and depositing.
    Playing,
    /// The player is manning the home base and aiming shots.
    Firing,
    /// The home base has fallen.
    GameOver,
}

/// Run condition: true while the scene is live (digging or defending).
pub fn in_gameplay(state: Res<State<GameState>>) -> bool {
    matches!(state.get(), GameState::Playing | GameState::Firing)
}

// ═══════════════════════════════════════════════════════════════════════
// GRID COORDINATES & MATERIALS
// ═══════════════════════════════════════════════════════════════════════

/// Integer grid address of a tile. Row 0 is the surface crust; rows grow
/// with depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// What a destructible tile is made of, and what it yields when mined out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    Stone,
    /// The ore. Seeded in 2x2 clusters.
    Iron,
}

impl Material {
    pub const ALL: [Material; 2] = [Material::Stone, Material::Iron];

    pub fn name(self) -> &'static str {
        match self {
            Material::Stone => "stone",
            Material::Iron => "iron",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MOVEMENT INTENT
// ═══════════════════════════════════════════════════════════════════════

/// The direction the player is trying to move this tick, resolved once per
/// frame from whichever input source is active.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementIntent {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// Player body state shared with the host's physics.
///
/// `position` is written by the host after integration; `velocity` is the
/// desired velocity the core asks the host to apply. Logical world space:
/// `y` grows with depth.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub momentum: Vec2,
    pub facing_left: bool,
}

impl PlayerBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            momentum: Vec2::ZERO,
            facing_left: true,
        }
    }
}

impl FromWorld for PlayerBody {
    fn from_world(world: &mut World) -> Self {
        let config = world
            .get_resource::<crate::config::WorldConfig>()
            .cloned()
            .unwrap_or_default();
        Self::at(config.player_spawn())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & PROGRESSION
// ═══════════════════════════════════════════════════════════════════════

/// Per-material unit counts. Every material always has an entry so HUD
/// snapshots list zeroes rather than omitting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub counts: BTreeMap<Material, u32>,
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self {
            counts: Material::ALL.iter().map(|m| (*m, 0)).collect(),
        }
    }
}

/// Resources the player is hauling. Credited by mining, drained by deposit.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct PlayerResources(pub ResourcePool);

/// Stock held at the home base. Only grows, and only through deposits.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct BaseResources(pub ResourcePool);

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgression {
    pub experience: u32,
    pub level: u32,
    pub next_level_threshold: u32,
}

impl Default for PlayerProgression {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            next_level_threshold: 100,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DEFENCE IDS
// ═══════════════════════════════════════════════════════════════════════

/// Handle for one enemy, shared with the host so it can report hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Handle for one arrow in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShotId(pub u32);

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — host → core
// ═══════════════════════════════════════════════════════════════════════

/// The host's physics reports the player body overlapping a tile this tick.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileContactEvent {
    pub tile: TileCoord,
}

/// The player touched the home base.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DepositEvent;

/// Virtual joystick input. Angles are radians from the joystick base toward
/// the pointer, in screen space (positive angles point downwards).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum JoystickEvent {
    Drag { angle: f32 },
    Release,
}

/// Pointer press/release while manning the base.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum TriggerEvent {
    Press { target: Vec2 },
    Release,
}

/// The player clicked the home base.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleFiringModeEvent;

/// An enemy struck the home base.
/// An arrow reached an enemy. Spent or unknown arrows do nothing.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotHitEvent {
    pub shot: ShotId,
    pub enemy: EnemyId,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BaseHitEvent {
    pub damage: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — core → host
// ═══════════════════════════════════════════════════════════════════════

/// A tile took a hit but survived. `crack_fraction` is purely visual.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TileDamagedEvent {
    pub tile: TileCoord,
    pub crack_fraction: f32,
}

/// A tile was mined out and removed from the grid.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDestroyedEvent {
    pub tile: TileCoord,
    pub material: Material,
    pub amount: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpEvent {
    pub level: u32,
    pub next_level_threshold: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotFiredEvent {
    pub shot: ShotId,
    pub origin: Vec2,
    pub target: Vec2,
}

/// The arrow's lifetime ran out before it hit anything; despawn it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotExpiredEvent {
    pub shot: ShotId,
}

/// A wave arrived: spawn its enemy at `position` and send it at the base.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WaveSpawnEvent {
    pub wave: u32,
    pub enemy: EnemyId,
    pub position: Vec2,
    pub health: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySlainEvent {
    pub enemy: EnemyId,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct BaseDestroyedEvent;
