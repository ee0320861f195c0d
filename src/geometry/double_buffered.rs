use tracing::warn;

use crate::geometry::Shape;

/// Holds the two poses of a shape used for swept collision tests: the
/// buffered pose at the start of the step (t0) and the current pose at the
/// end of the step (t1).
///
/// Both poses are owned by value and are always the same variant: `new` and
/// `buffer` install clones of one shape, and `update_buffer` copies the
/// current pose wholesale.
#[derive(Debug, Clone)]
pub struct DoubleBufferedShape {
    shapes: [Shape; 2],
    front: usize,
}

impl DoubleBufferedShape {
    /// Installs `shape` as both poses.
    pub fn new(shape: Shape) -> Self {
        Self {
            shapes: [shape.clone(), shape],
            front: 0,
        }
    }

    /// Replaces both poses with clones of `shape`. This discards a live
    /// pair mid-step, which is almost always a caller error; `new` is the
    /// way to install a shape in the first place.
    pub fn buffer(&mut self, shape: Shape) {
        warn!("replacing a buffered shape pair; both poses are discarded");
        self.shapes = [shape.clone(), shape];
        self.front = 0;
    }

    /// Current pose (t1).
    pub fn current(&self) -> &Shape {
        &self.shapes[self.front]
    }

    pub fn current_mut(&mut self) -> &mut Shape {
        &mut self.shapes[self.front]
    }

    /// Buffered pose (t0).
    pub fn buffered(&self) -> &Shape {
        &self.shapes[1 - self.front]
    }

    pub fn buffered_mut(&mut self) -> &mut Shape {
        &mut self.shapes[1 - self.front]
    }

    /// Swaps the roles of the two poses in O(1). Applying it twice is the
    /// identity.
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }

    /// Copies the current pose over the buffered one; the end-of-step
    /// commit before the next integration.
    pub fn update_buffer(&mut self) {
        self.shapes[1 - self.front] = self.shapes[self.front].clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Circle;
    use crate::math::Vec2;

    fn circle_at(x: f64) -> Shape {
        Shape::Circle(Circle::new(Vec2::new(x, 0.0), 1.0))
    }

    fn center(shape: &Shape) -> Vec2 {
        match shape {
            Shape::Circle(c) => c.center,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_new_installs_both_poses() {
        let dbs = DoubleBufferedShape::new(circle_at(1.0));
        assert_eq!(dbs.current(), dbs.buffered());
    }

    #[test]
    fn test_swap_is_involution() {
        let mut dbs = DoubleBufferedShape::new(circle_at(0.0));
        dbs.current_mut().transform(0.0, Vec2::new(5.0, 0.0));
        let cur = center(dbs.current());
        let buf = center(dbs.buffered());

        dbs.swap();
        assert_eq!(center(dbs.current()), buf);
        assert_eq!(center(dbs.buffered()), cur);

        dbs.swap();
        assert_eq!(center(dbs.current()), cur);
        assert_eq!(center(dbs.buffered()), buf);
    }

    #[test]
    fn test_update_buffer_commits_current() {
        let mut dbs = DoubleBufferedShape::new(circle_at(0.0));
        dbs.current_mut().transform(0.0, Vec2::new(3.0, 4.0));
        assert_ne!(dbs.current(), dbs.buffered());
        dbs.update_buffer();
        assert_eq!(dbs.current(), dbs.buffered());
    }

    #[test]
    fn test_buffer_replaces_pair() {
        let mut dbs = DoubleBufferedShape::new(circle_at(0.0));
        dbs.current_mut().transform(0.0, Vec2::new(9.0, 0.0));
        dbs.buffer(circle_at(2.0));
        assert_eq!(center(dbs.current()), Vec2::new(2.0, 0.0));
        assert_eq!(dbs.current(), dbs.buffered());
    }
}
