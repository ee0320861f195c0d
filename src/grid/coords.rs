// The world is unbounded, so positions are split into a coarse integer cell
// and a double-precision offset local to that cell. Keeping the local offset
// small preserves floating-point precision arbitrarily far from the origin.

use std::ops::{Add, Sub};

use crate::math::Vec2;

/// Edge length of one grid cell in meters.
pub const CELL_SIZE: f64 = 2.0e12;

/// Half a cell edge; the largest magnitude a normalized local offset can have.
pub const HALF_CELL_SIZE: f64 = CELL_SIZE * 0.5;

/// Maximum absolute coordinate value per axis. Positions are clamped here to
/// prevent runaway numeric growth.
pub const WORLD_LIMIT: f64 = 3.0e20;

/// Integer index of a fixed-size square region of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ZERO: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Cell {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Cell {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Returns the world offset of a grid cell: cell index times the cell size.
///
/// Exact for every cell index reachable in practice, since `CELL_SIZE` is a
/// power-of-two multiple of a small decimal and cell indices are 32-bit.
#[inline]
pub fn cell_to_world(cell: Cell) -> Vec2 {
    Vec2::new(f64::from(cell.x) * CELL_SIZE, f64::from(cell.y) * CELL_SIZE)
}

/// Splits a world position into its local offset and grid cell.
///
/// The cell is chosen so that the local offset never exceeds half a cell edge
/// per component. Deterministic: identical input always yields the identical
/// split, which keeps far-from-origin positions numerically stable.
#[inline]
pub fn separate_center_cell(world: Vec2) -> (Vec2, Cell) {
    let cx = ((world.x + HALF_CELL_SIZE) / CELL_SIZE).floor();
    let cy = ((world.y + HALF_CELL_SIZE) / CELL_SIZE).floor();
    let cell = Cell::new(cx as i32, cy as i32);
    let local = world - cell_to_world(cell);
    (local, cell)
}

/// Clamps each component to the configured world limit; positions within the
/// limit pass through unchanged.
#[inline]
pub fn clip_to_world_limit(v: Vec2) -> Vec2 {
    Vec2::new(
        v.x.clamp(-WORLD_LIMIT, WORLD_LIMIT),
        v.y.clamp(-WORLD_LIMIT, WORLD_LIMIT),
    )
}
