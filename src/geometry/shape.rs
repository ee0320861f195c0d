use crate::geometry::{BoundingBox, Circle, Planet, Polygon, Terrain};
use crate::math::Vec2;

/// Closed set of shape variants; the narrow phase matches exhaustively over
/// pairs of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
    Terrain(Terrain),
    Planet(Planet),
}

impl Shape {
    /// Applies a rigid transform (rotation about the body origin, then
    /// translation) and rebuilds the bounding box. Terrain ignores the
    /// transform; it is static by definition.
    pub fn transform(&mut self, angle: f64, position: Vec2) {
        match self {
            Shape::Circle(c) => c.transform(angle, position),
            Shape::Polygon(p) => p.transform(angle, position),
            Shape::Terrain(t) => t.transform(angle, position),
            Shape::Planet(p) => p.transform(angle, position),
        }
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        match self {
            Shape::Circle(c) => c.bounding_box(),
            Shape::Polygon(p) => p.bounding_box(),
            Shape::Terrain(t) => t.bounding_box(),
            Shape::Planet(p) => p.bounding_box(),
        }
    }

    pub fn bounding_box_mut(&mut self) -> &mut BoundingBox {
        match self {
            Shape::Circle(c) => c.bounding_box_mut(),
            Shape::Polygon(p) => p.bounding_box_mut(),
            Shape::Terrain(t) => t.bounding_box_mut(),
            Shape::Planet(p) => p.bounding_box_mut(),
        }
    }
}
