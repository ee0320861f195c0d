use crate::geometry::BoundingBox;
use crate::math::Vec2;

/// Circle shape: a rest-pose center plus the transformed current center.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center in the body frame, untouched by `transform`.
    pub center_rest: Vec2,
    /// Center in cell-local world coordinates after the last `transform`.
    pub center: Vec2,
    pub radius: f64,
    bounding_box: BoundingBox,
}

impl Circle {
    pub fn new(center_rest: Vec2, radius: f64) -> Self {
        assert!(radius > 0.0, "circle radius must be positive");
        let mut circle = Self {
            center_rest,
            center: center_rest,
            radius,
            bounding_box: BoundingBox::new(),
        };
        circle.rebuild_bounding_box();
        circle
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_box_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounding_box
    }

    /// Applies a rigid transform: the rest center is rotated about the body
    /// origin and translated, then the bounding box is rebuilt around the new
    /// center.
    pub fn transform(&mut self, angle: f64, position: Vec2) {
        self.center = self.center_rest.rotate(angle) + position;
        self.rebuild_bounding_box();
    }

    fn rebuild_bounding_box(&mut self) {
        let r = Vec2::splat(self.radius);
        self.bounding_box.set_lower_left(self.center - r);
        self.bounding_box.set_upper_right(self.center + r);
    }
}
