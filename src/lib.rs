//! Continuous collision detection core for an unbounded 2D world.
//!
//! Positions are split into an integer grid cell plus a small local offset so
//! precision never degrades far from the origin. Shapes are double buffered:
//! each holds its pose at the start (t0) and end (t1) of the step, and the
//! narrow phase solves for the exact time of impact along the linear sweep
//! between the two instead of sampling. Point particles are swept the same
//! way and reflected off rigid surfaces.
//!
//! The [`collision::CollisionManager`] borrows the scene per call and never
//! mutates rigid bodies; collision response is a pluggable hook.

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod math;
pub mod objects;
pub mod particles;

pub use collision::{ColliderId, CollisionManager, ContactEvent};
pub use geometry::{
    BoundingBox, Circle, DoubleBufferedShape, Planet, Polygon, PolygonKind, Shape, Terrain,
};
pub use grid::{cell_to_world, separate_center_cell, Cell, CELL_SIZE, WORLD_LIMIT};
pub use math::Vec2;
pub use objects::Body;
pub use particles::ParticleBatch;
