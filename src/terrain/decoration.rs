//! Exposure overlays — which faces of a tile are open to a mined-out cell.
//!
//! A tile's decoration is a pure function of which of its eight neighbours are
//! vacant, so recomputing it any number of times against the same grid gives
//! the same answer. A vacant cardinal neighbour always beats a vacant diagonal.

use crate::shared::*;
use super::grid::{Corner, Decoration, Side, TileGrid};

/// Neighbour offsets `(dcol, drow)` in decoration priority order.
/// `drow = -1` is the row above.
const CARDINALS: [(i32, i32, Side); 4] = [
    (0, -1, Side::Up),
    (0, 1, Side::Down),
    (-1, 0, Side::Left),
    (1, 0, Side::Right),
];

const DIAGONALS: [(i32, i32, Corner); 4] = [
    (-1, 1, Corner::DownLeft),
    (1, 1, Corner::DownRight),
    (1, -1, Corner::UpRight),
    (-1, -1, Corner::UpLeft),
];

/// Bitset of vacant neighbours. Bits 0-3 follow `CARDINALS`, bits 4-7 follow
/// `DIAGONALS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborMask(u8);

impl NeighborMask {
    pub fn of(grid: &TileGrid, coord: TileCoord) -> Self {
        let mut bits = 0u8;
        for (i, (dc, dr, _)) in CARDINALS.iter().enumerate() {
            if grid.is_vacant(coord.offset(*dc, *dr)) {
                bits |= 1 << i;
            }
        }
        for (i, (dc, dr, _)) in DIAGONALS.iter().enumerate() {
            if grid.is_vacant(coord.offset(*dc, *dr)) {
                bits |= 1 << (i + 4);
            }
        }
        Self(bits)
    }

    pub fn with_side(self, side: Side) -> Self {
        match CARDINALS.iter().position(|(_, _, s)| *s == side) {
            Some(i) => Self(self.0 | 1 << i),
            None => self,
        }
    }

    pub fn with_corner(self, corner: Corner) -> Self {
        match DIAGONALS.iter().position(|(_, _, c)| *c == corner) {
            Some(i) => Self(self.0 | 1 << (i + 4)),
            None => self,
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

pub fn decoration_for(mask: NeighborMask) -> Decoration {
    for (i, (_, _, side)) in CARDINALS.iter().enumerate() {
        if mask.0 & (1 << i) != 0 {
            return Decoration::Edge(*side);
        }
    }
    for (i, (_, _, corner)) in DIAGONALS.iter().enumerate() {
        if mask.0 & (1 << (i + 4)) != 0 {
            return Decoration::Corner(*corner);
        }
    }
    Decoration::None
}

/// Recompute the decoration of the destructible tile at `coord`. Returns
/// whether anything visible changed. Static ground and vacant cells are
/// left alone.
pub fn redecorate(grid: &mut TileGrid, coord: TileCoord) -> bool {
    let mask = NeighborMask::of(grid, coord);
    let Some(tile) = grid.get_mut(coord) else {
        return false;
    };
    if !tile.is_destructible() {
        return false;
    }

    let decoration = decoration_for(mask);
    let exposed = tile.exposed || !mask.is_empty();
    let changed = tile.decoration != decoration || tile.exposed != exposed;
    tile.decoration = decoration;
    tile.exposed = exposed;
    changed
}

/// Refresh every surviving neighbour of a freshly vacated coordinate.
/// Returns how many tiles changed.
pub fn redecorate_neighbors(grid: &mut TileGrid, vacated: TileCoord) -> usize {
    let mut changed = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dc == 0 && dr == 0 {
                continue;
            }
            if redecorate(grid, vacated.offset(dc, dr)) {
                changed += 1;
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::Tile;

    /// A fully packed 5x5 grid of stone.
    fn packed_grid() -> TileGrid {
        let mut grid = TileGrid::new(5, 5);
        for col in 0..5 {
            for row in 0..5 {
                grid.insert(TileCoord::new(col, row), Tile::rock(Material::Stone, 1, 0));
            }
        }
        grid
    }

    fn mine(grid: &mut TileGrid, coord: TileCoord) {
        assert!(grid.apply_damage(coord, 1).destroyed);
        redecorate_neighbors(grid, coord);
    }

    fn decoration(grid: &TileGrid, coord: TileCoord) -> Decoration {
        grid.get(coord).map(|t| t.decoration).unwrap_or_default()
    }

    #[test]
    fn cardinal_neighbours_face_the_hole() {
        let mut grid = packed_grid();
        let hole = TileCoord::new(2, 2);
        mine(&mut grid, hole);

        assert_eq!(decoration(&grid, hole.offset(0, 1)), Decoration::Edge(Side::Up));
        assert_eq!(decoration(&grid, hole.offset(0, -1)), Decoration::Edge(Side::Down));
        assert_eq!(decoration(&grid, hole.offset(1, 0)), Decoration::Edge(Side::Left));
        assert_eq!(decoration(&grid, hole.offset(-1, 0)), Decoration::Edge(Side::Right));
        assert!(grid.get(hole.offset(0, 1)).is_some_and(|t| t.exposed));
    }

    #[test]
    fn diagonal_neighbours_get_corners() {
        let mut grid = packed_grid();
        let hole = TileCoord::new(2, 2);
        mine(&mut grid, hole);

        assert_eq!(decoration(&grid, hole.offset(-1, -1)), Decoration::Corner(Corner::DownRight));
        assert_eq!(decoration(&grid, hole.offset(1, -1)), Decoration::Corner(Corner::DownLeft));
        assert_eq!(decoration(&grid, hole.offset(-1, 1)), Decoration::Corner(Corner::UpRight));
        assert_eq!(decoration(&grid, hole.offset(1, 1)), Decoration::Corner(Corner::UpLeft));
    }

    #[test]
    fn edge_wins_over_corner_regardless_of_order() {
        // Diagonal first, then cardinal.
        let mut grid = packed_grid();
        let watched = TileCoord::new(2, 2);
        mine(&mut grid, watched.offset(1, 1));
        assert_eq!(decoration(&grid, watched), Decoration::Corner(Corner::DownRight));
        mine(&mut grid, watched.offset(-1, 0));
        assert_eq!(decoration(&grid, watched), Decoration::Edge(Side::Left));

        // Cardinal first, then diagonal: the edge must survive.
        let mut grid = packed_grid();
        mine(&mut grid, watched.offset(-1, 0));
        mine(&mut grid, watched.offset(1, 1));
        assert_eq!(decoration(&grid, watched), Decoration::Edge(Side::Left));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut grid = packed_grid();
        mine(&mut grid, TileCoord::new(1, 1));
        mine(&mut grid, TileCoord::new(3, 2));

        let before: Vec<_> = grid.iter().map(|(c, t)| (c, t.decoration)).collect();
        for (coord, _) in &before {
            assert!(!redecorate(&mut grid, *coord), "{coord:?} changed on recompute");
        }
        for (coord, decoration) in before {
            assert_eq!(grid.get(coord).map(|t| t.decoration), Some(decoration));
        }
    }

    #[test]
    fn world_edges_count_as_solid() {
        let mut grid = packed_grid();
        let corner = TileCoord::new(0, 0);
        redecorate(&mut grid, corner);
        assert_eq!(decoration(&grid, corner), Decoration::None);
        assert!(grid.get(corner).is_some_and(|t| !t.exposed));

        mine(&mut grid, TileCoord::new(0, 1));
        assert_eq!(decoration(&grid, corner), Decoration::Edge(Side::Down));
    }

    #[test]
    fn static_ground_is_never_decorated() {
        let mut grid = packed_grid();
        let crust = TileCoord::new(2, 0);
        grid.insert(crust, Tile::static_ground());
        mine(&mut grid, TileCoord::new(2, 1));
        assert_eq!(decoration(&grid, crust), Decoration::None);
    }

    #[test]
    fn priority_follows_fixed_order() {
        let mask = NeighborMask::default()
            .with_side(Side::Right)
            .with_side(Side::Down)
            .with_corner(Corner::UpLeft);
        assert_eq!(decoration_for(mask), Decoration::Edge(Side::Down));

        let mask = NeighborMask::default()
            .with_corner(Corner::UpLeft)
            .with_corner(Corner::DownRight);
        assert_eq!(decoration_for(mask), Decoration::Corner(Corner::DownRight));

        assert_eq!(decoration_for(NeighborMask::default()), Decoration::None);
    }
}
