use crate::geometry::{BoundingBox, DoubleBufferedShape, Shape};
use crate::grid::{clip_to_world_limit, separate_center_cell, Cell};
use crate::math::Vec2;

/// Depth-layer mask matching every layer.
pub const ALL_DEPTH_LAYERS: u32 = 0xFFFF_FFFF;

/// A rigid body: a list of double-buffered shapes plus the kinematic state
/// needed to place and sweep them. Mass and inertia are handled by outer
/// integration layers, not here.
#[derive(Debug, Clone)]
pub struct Body {
    shapes: Vec<DoubleBufferedShape>,
    /// Origin local to `cell`.
    origin: Vec2,
    cell: Cell,
    pub velocity: Vec2,
    pub angle: f64,
    pub angle_velocity: f64,
    /// Static bodies are collision targets but never initiate pair tests.
    pub dynamic: bool,
    /// Bodies only collide when their depth masks share a bit.
    pub depth_layers: u32,
    swept_box: BoundingBox,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            origin: Vec2::ZERO,
            cell: Cell::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angle_velocity: 0.0,
            dynamic: true,
            depth_layers: ALL_DEPTH_LAYERS,
            swept_box: BoundingBox::new(),
        }
    }

    pub fn shapes(&self) -> &[DoubleBufferedShape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [DoubleBufferedShape] {
        &mut self.shapes
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(DoubleBufferedShape::new(shape));
    }

    /// Origin local to the body's cell.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Places the body at an absolute world position. The position is
    /// clamped to the world limit and split into cell plus local offset so
    /// the local coordinates stay numerically small.
    pub fn set_origin(&mut self, world: Vec2) {
        let (origin, cell) = separate_center_cell(clip_to_world_limit(world));
        self.origin = origin;
        self.cell = cell;
    }

    /// Bounding box covering the body's shapes in both buffered poses, in
    /// the body's cell.
    pub fn swept_bounding_box(&self) -> &BoundingBox {
        &self.swept_box
    }

    /// Applies the current kinematic state to every shape's current pose and
    /// rebuilds the swept bounding box over both poses.
    pub fn transform(&mut self) {
        let (angle, origin, cell) = (self.angle, self.origin, self.cell);
        for dbs in &mut self.shapes {
            let shape = dbs.current_mut();
            shape.transform(angle, origin);
            shape.bounding_box_mut().set_cell(cell);
        }
        self.rebuild_swept_box();
    }

    /// Makes the current poses the buffered (t0) poses for the next step.
    pub fn swap_buffers(&mut self) {
        for dbs in &mut self.shapes {
            dbs.swap();
        }
    }

    /// Commits the current poses into the buffers, discarding the old t0.
    pub fn update_buffers(&mut self) {
        for dbs in &mut self.shapes {
            dbs.update_buffer();
        }
        self.rebuild_swept_box();
    }

    fn rebuild_swept_box(&mut self) {
        let mut boxes = self
            .shapes
            .iter()
            .flat_map(|dbs| [dbs.current().bounding_box(), dbs.buffered().bounding_box()]);
        if let Some(first) = boxes.next() {
            self.swept_box = *first;
            for b in boxes {
                self.swept_box.update(b);
            }
        } else {
            self.swept_box = BoundingBox::new();
        }
        self.swept_box.set_cell(self.cell);
    }
}
