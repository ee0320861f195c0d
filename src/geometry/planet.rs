use crate::geometry::BoundingBox;
use crate::math::Vec2;

/// Planet shape: a circle whose surface is displaced by a height profile of
/// at most `height_max` above the base radius.
///
/// Collision handling for planets is not implemented; the narrow phase
/// reports "no contact" for every pairing. The shape still participates in
/// transforms and broad-phase culling so a scene can carry planets.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Center in the body frame, untouched by `transform`.
    pub center_rest: Vec2,
    /// Center in cell-local world coordinates after the last `transform`.
    pub center: Vec2,
    /// Base radius below the surface profile.
    pub radius: f64,
    /// Maximum height of the surface above the base radius.
    pub height_max: f64,
    /// Arc length between surface samples.
    pub ground_resolution: f64,
    /// Rotation applied by the last `transform`.
    pub angle: f64,
    bounding_box: BoundingBox,
}

impl Planet {
    pub fn new(center_rest: Vec2, radius: f64, height_max: f64, ground_resolution: f64) -> Self {
        assert!(radius > 0.0, "planet radius must be positive");
        assert!(height_max >= 0.0);
        let mut planet = Self {
            center_rest,
            center: center_rest,
            radius,
            height_max,
            ground_resolution,
            angle: 0.0,
            bounding_box: BoundingBox::new(),
        };
        planet.rebuild_bounding_box();
        planet
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_box_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounding_box
    }

    /// Applies a rigid transform; the bounding box covers the base radius
    /// plus the maximum surface height.
    pub fn transform(&mut self, angle: f64, position: Vec2) {
        self.center = self.center_rest.rotate(angle) + position;
        self.angle = angle;
        self.rebuild_bounding_box();
    }

    fn rebuild_bounding_box(&mut self) {
        let extent = Vec2::splat(self.radius + self.height_max);
        self.bounding_box.set_lower_left(self.center - extent);
        self.bounding_box.set_upper_right(self.center + extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_includes_height() {
        let p = Planet::new(Vec2::ZERO, 100.0, 10.0, 1.0);
        assert_eq!(p.bounding_box().lower_left(), Vec2::new(-110.0, -110.0));
        assert_eq!(p.bounding_box().upper_right(), Vec2::new(110.0, 110.0));
    }

    #[test]
    fn test_transform_moves_center() {
        let mut p = Planet::new(Vec2::ZERO, 50.0, 5.0, 1.0);
        p.transform(1.0, Vec2::new(1000.0, 0.0));
        assert_eq!(p.center, Vec2::new(1000.0, 0.0));
        assert_eq!(p.angle, 1.0);
    }
}
