//! The tile grid and the per-tile health state machine.
//!
//! Tiles are plain records owned by `TileGrid`. A coordinate with no entry is
//! vacant: either never filled (the shaft) or mined out. Mined-out tiles never
//! come back.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

/// Cardinal direction of an exposed face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// Diagonal direction of an exposed corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// Overlay the renderer draws on a tile to show which neighbour is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decoration {
    #[default]
    None,
    Edge(Side),
    Corner(Corner),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rock {
    pub material: Material,
    pub health: u32,
    pub max_health: u32,
    /// Units credited to the player when this rock is mined out.
    pub yield_amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Surface crust. Never takes damage.
    StaticGround,
    Destructible(Rock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub decoration: Decoration,
    /// Whether the renderer shows the material's own texture instead of the
    /// unexplored dark one.
    pub exposed: bool,
}

/// Visible damage state of a tile still in the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileState {
    Intact,
    Cracked(f32),
}

impl Tile {
    pub fn static_ground() -> Self {
        Self {
            kind: TileKind::StaticGround,
            decoration: Decoration::None,
            exposed: true,
        }
    }

    pub fn rock(material: Material, health: u32, yield_amount: u32) -> Self {
        Self {
            kind: TileKind::Destructible(Rock {
                material,
                health,
                max_health: health,
                yield_amount,
            }),
            decoration: Decoration::None,
            exposed: false,
        }
    }

    pub fn material(&self) -> Option<Material> {
        match self.kind {
            TileKind::StaticGround => None,
            TileKind::Destructible(rock) => Some(rock.material),
        }
    }

    pub fn is_destructible(&self) -> bool {
        matches!(self.kind, TileKind::Destructible(_))
    }

    /// `1 - health / max_health`. Zero for static ground.
    pub fn crack_fraction(&self) -> f32 {
        match self.kind {
            TileKind::StaticGround => 0.0,
            TileKind::Destructible(rock) if rock.max_health == 0 => 1.0,
            TileKind::Destructible(rock) => 1.0 - rock.health as f32 / rock.max_health as f32,
        }
    }

    pub fn state(&self) -> TileState {
        let fraction = self.crack_fraction();
        if fraction > 0.0 {
            TileState::Cracked(fraction)
        } else {
            TileState::Intact
        }
    }
}

/// Material and amount handed over when a rock is mined out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileYield {
    pub material: Material,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    pub destroyed: bool,
    pub yielded: Option<TileYield>,
}

/// Sparse coordinate → tile map with fixed logical bounds.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileGrid {
    columns: i32,
    rows: i32,
    tiles: HashMap<TileCoord, Tile>,
    ore_seeds: Vec<TileCoord>,
}

impl TileGrid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns: columns.max(0),
            rows: rows.max(0),
            tiles: HashMap::new(),
            ore_seeds: Vec::new(),
        }
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        (0..self.columns).contains(&coord.col) && (0..self.rows).contains(&coord.row)
    }

    /// Place a tile. Out-of-bounds coordinates are ignored.
    pub fn insert(&mut self, coord: TileCoord, tile: Tile) {
        if self.in_bounds(coord) {
            self.tiles.insert(coord, tile);
        }
    }

    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// An in-bounds coordinate with no tile. Outside the grid counts as solid.
    pub fn is_vacant(&self, coord: TileCoord) -> bool {
        self.in_bounds(coord) && !self.tiles.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &Tile)> {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }

    /// Top-left cells of every ore cluster seeded during generation.
    pub fn ore_seeds(&self) -> &[TileCoord] {
        &self.ore_seeds
    }

    pub(crate) fn record_ore_seed(&mut self, coord: TileCoord) {
        self.ore_seeds.push(coord);
    }

    /// Hit the tile at `coord` for `amount`. Health saturates at zero; a tile
    /// that reaches zero is removed and its yield returned. Static ground and
    /// vacant coordinates are no-ops.
    pub fn apply_damage(&mut self, coord: TileCoord, amount: u32) -> DamageOutcome {
        let Some(tile) = self.tiles.get_mut(&coord) else {
            return DamageOutcome::default();
        };
        let TileKind::Destructible(rock) = &mut tile.kind else {
            return DamageOutcome::default();
        };

        rock.health = rock.health.saturating_sub(amount);
        if rock.health > 0 {
            return DamageOutcome::default();
        }

        let yielded = TileYield {
            material: rock.material,
            amount: rock.yield_amount,
        };
        self.tiles.remove(&coord);
        DamageOutcome {
            destroyed: true,
            yielded: Some(yielded),
        }
    }
}
