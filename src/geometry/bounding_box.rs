use crate::grid::{cell_to_world, Cell};
use crate::math::Vec2;

/// Axis-aligned bounding box tied to a grid cell.
///
/// Coordinates are local to `cell`. Comparing boxes that live in different
/// cells therefore requires correcting one center by the world offset between
/// the cells; raw coordinate comparison far from the origin would silently
/// produce wrong overlap results.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    lower_left: Vec2,
    upper_right: Vec2,
    cell: Cell,
}

impl BoundingBox {
    /// Creates a zero-sized box at the origin of cell (0,0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lower_left(&self) -> Vec2 {
        self.lower_left
    }

    pub fn upper_right(&self) -> Vec2 {
        self.upper_right
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn set_lower_left(&mut self, v: Vec2) {
        self.lower_left = v;
    }

    pub fn set_upper_right(&mut self, v: Vec2) {
        self.upper_right = v;
    }

    pub fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// Tests a point (in this box's cell frame) for being inside the box,
    /// inclusive on both axes.
    pub fn is_inside(&self, point: Vec2) -> bool {
        self.lower_left.x <= point.x
            && self.lower_left.y <= point.y
            && self.upper_right.x >= point.x
            && self.upper_right.y >= point.y
    }

    /// Tests two bounding boxes for overlap.
    ///
    /// `cell_limit` steers behaviour in the universe grid: physical objects
    /// may not be larger than one cell, so they can only overlap when their
    /// cells differ by at most the limit (1 for neighbouring cells). A
    /// negative limit skips the cell distance check entirely, which the
    /// camera/culling path relies on. The separation test itself always
    /// compares cell-corrected centers.
    pub fn overlaps(&self, other: &BoundingBox, cell_limit: i32) -> bool {
        if cell_limit >= 0
            && ((self.cell.x - other.cell.x).abs() > cell_limit
                || (self.cell.y - other.cell.y).abs() > cell_limit)
        {
            return false;
        }

        let correction = cell_to_world(self.cell - other.cell);
        let center_a = (self.lower_left + self.upper_right) * 0.5;
        let center_b = (other.lower_left + other.upper_right) * 0.5;
        let half_a = (self.upper_right - self.lower_left) * 0.5;
        let half_b = (other.upper_right - other.lower_left) * 0.5;

        (center_a.x - center_b.x + correction.x).abs() < half_a.x.abs() + half_b.x.abs()
            && (center_a.y - center_b.y + correction.y).abs() < half_a.y.abs() + half_b.y.abs()
    }

    /// Grows the box to the union with `other` and adopts its cell. The cell
    /// of the most recently merged box wins; callers always update with a box
    /// in the authoritative current cell.
    pub fn update(&mut self, other: &BoundingBox) {
        self.lower_left.x = self.lower_left.x.min(other.lower_left.x);
        self.lower_left.y = self.lower_left.y.min(other.lower_left.y);
        self.upper_right.x = self.upper_right.x.max(other.upper_right.x);
        self.upper_right.y = self.upper_right.y.max(other.upper_right.y);
        self.cell = other.cell;
    }

    /// Grows the box to include a point.
    pub fn update_point(&mut self, point: Vec2) {
        if point.x < self.lower_left.x {
            self.lower_left.x = point.x;
        } else if point.x > self.upper_right.x {
            self.upper_right.x = point.x;
        }
        if point.y < self.lower_left.y {
            self.lower_left.y = point.y;
        } else if point.y > self.upper_right.y {
            self.upper_right.y = point.y;
        }
    }

    /// Collapses the box onto a single point, keeping the current cell.
    pub fn reset_to_point(&mut self, point: Vec2) {
        self.lower_left = point;
        self.upper_right = point;
    }
}
