//! Mining resolver — decides whether the tile the player is touching is the
//! one being struck, and applies the hit.
//!
//! A tile is struck only when the player is pushing toward it and it sits
//! within one tile-size band on the perpendicular axis. Destruction credits
//! the haul, grants experience, and refreshes the neighbouring decorations
//! in the same step, so the grid and its overlays never disagree at the end
//! of a tick.

use bevy::prelude::*;

use crate::config::WorldConfig;
use crate::shared::*;
use crate::terrain::decoration::redecorate_neighbors;
use crate::terrain::TileGrid;

/// Direction gate. Positions are world space with `y` growing downward.
pub fn strikes_tile(player: Vec2, intent: MovementIntent, tile: Vec2, tile_size: f32) -> bool {
    match intent {
        MovementIntent::Left => tile.x <= player.x && (tile.y - player.y).abs() <= tile_size,
        MovementIntent::Right => tile.x >= player.x && (tile.y - player.y).abs() <= tile_size,
        MovementIntent::Down => tile.y >= player.y && tile.x - player.x <= tile_size,
        MovementIntent::Up => tile.y <= player.y && player.x - tile.x <= tile_size,
        MovementIntent::None => false,
    }
}

/// What a single strike did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrikeResult {
    /// The tile is gone (or never damageable): nothing happened.
    Missed,
    Cracked { crack_fraction: f32 },
    Destroyed { material: Material, amount: u32, levels_gained: u32 },
}

/// Everything a strike touches, borrowed for the duration of one hit.
pub struct MiningContext<'a> {
    pub grid: &'a mut TileGrid,
    pub haul: &'a mut PlayerResources,
    pub progression: &'a mut PlayerProgression,
}

impl MiningContext<'_> {
    /// Hit `coord` for `damage`. On destruction the yield goes to the
    /// player's haul (never straight to the base), `experience` is granted,
    /// and the neighbours are redecorated before returning.
    pub fn strike(&mut self, coord: TileCoord, damage: u32, experience: u32) -> StrikeResult {
        if !self.grid.get(coord).is_some_and(|tile| tile.is_destructible()) {
            return StrikeResult::Missed;
        }

        let outcome = self.grid.apply_damage(coord, damage);
        let Some(yielded) = outcome.yielded.filter(|_| outcome.destroyed) else {
            let crack_fraction = self
                .grid
                .get(coord)
                .map(|tile| tile.crack_fraction())
                .unwrap_or_default();
            return StrikeResult::Cracked { crack_fraction };
        };

        self.haul.credit(yielded.material, yielded.amount);
        let levels_gained = self.progression.grant(experience);
        redecorate_neighbors(self.grid, coord);

        StrikeResult::Destroyed {
            material: yielded.material,
            amount: yielded.amount,
            levels_gained,
        }
    }
}

/// System: resolve this tick's tile contacts against the movement intent.
pub fn handle_tile_contacts(
    mut contacts: EventReader<TileContactEvent>,
    intent: Res<MovementIntent>,
    body: Res<PlayerBody>,
    config: Res<WorldConfig>,
    mut grid: ResMut<TileGrid>,
    mut haul: ResMut<PlayerResources>,
    mut progression: ResMut<PlayerProgression>,
    mut damaged_events: EventWriter<TileDamagedEvent>,
    mut destroyed_events: EventWriter<TileDestroyedEvent>,
    mut level_events: EventWriter<LevelUpEvent>,
) {
    if *intent == MovementIntent::None {
        contacts.clear();
        return;
    }

    let mut ctx = MiningContext {
        grid: &mut grid,
        haul: &mut haul,
        progression: &mut progression,
    };

    for contact in contacts.read() {
        let tile_pos = config.tile_position(contact.tile);
        if !strikes_tile(body.position, *intent, tile_pos, config.tile_size) {
            continue;
        }

        match ctx.strike(contact.tile, config.player_damage, config.experience_per_tile) {
            StrikeResult::Missed => {}
            StrikeResult::Cracked { crack_fraction } => {
                damaged_events.send(TileDamagedEvent {
                    tile: contact.tile,
                    crack_fraction,
                });
            }
            StrikeResult::Destroyed {
                material,
                amount,
                levels_gained,
            } => {
                debug!(
                    "[Mining] Mined out ({}, {}): +{} {}",
                    contact.tile.col,
                    contact.tile.row,
                    amount,
                    material.name()
                );
                destroyed_events.send(TileDestroyedEvent {
                    tile: contact.tile,
                    material,
                    amount,
                });
                if levels_gained > 0 {
                    level_events.send(LevelUpEvent {
                        level: ctx.progression.level,
                        next_level_threshold: ctx.progression.next_level_threshold,
                    });
                }
            }
        }
    }
}
