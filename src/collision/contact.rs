use crate::grid::Cell;
use crate::math::Vec2;

/// Identifies one side of a contact within the collections handed to the
/// collision manager for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderId {
    /// Index into the dynamic object slice.
    Dynamic(usize),
    /// Index into the static object slice.
    Static(usize),
    /// Particle batch index and slot within the batch.
    Particle { batch: usize, slot: usize },
}

/// Earliest contact found for one collider pair within a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub a: ColliderId,
    pub b: ColliderId,
    /// Normalized time of contact, in [0, 1]; 0 is the buffered pose, 1 the
    /// current pose.
    pub time: f64,
    /// Point of contact, local to `cell`.
    pub point: Vec2,
    pub cell: Cell,
}
