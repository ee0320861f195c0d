use crate::grid::Cell;
use crate::math::Vec2;

/// A batch of point particles stored as parallel arrays backed by a fixed
/// ring: once the batch is full, spawning overwrites the oldest slot.
///
/// Particles are massless tracer-style debris. They never collide with each
/// other; the collision manager sweeps each one from its previous to its
/// current position against rigid shapes.
#[derive(Debug, Clone)]
pub struct ParticleBatch {
    pub(crate) positions: Vec<Vec2>,
    pub(crate) previous_positions: Vec<Vec2>,
    pub(crate) velocities: Vec<Vec2>,
    pub(crate) active: Vec<bool>,
    /// Grid cell all positions in the batch are local to.
    pub cell: Cell,
    next: usize,
}

impl ParticleBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "particle batch capacity must be positive");
        Self {
            positions: vec![Vec2::ZERO; capacity],
            previous_positions: vec![Vec2::ZERO; capacity],
            velocities: vec![Vec2::ZERO; capacity],
            active: vec![false; capacity],
            cell: Cell::ZERO,
            next: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Spawns a particle, overwriting the oldest slot when the ring is full.
    /// Returns the slot index.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2) -> usize {
        let slot = self.next;
        self.positions[slot] = position;
        self.previous_positions[slot] = position;
        self.velocities[slot] = velocity;
        self.active[slot] = true;
        self.next = (self.next + 1) % self.capacity();
        slot
    }

    pub fn deactivate(&mut self, slot: usize) {
        self.active[slot] = false;
    }

    /// Integrates every active particle by one step: the current position
    /// becomes the previous one, then moves along the velocity.
    pub fn advance(&mut self, dt: f64) {
        for i in 0..self.capacity() {
            if self.active[i] {
                self.previous_positions[i] = self.positions[i];
                self.positions[i] += self.velocities[i] * dt;
            }
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn previous_positions(&self) -> &[Vec2] {
        &self.previous_positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn is_active(&self, slot: usize) -> bool {
        self.active[slot]
    }
}
