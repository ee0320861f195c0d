use crate::geometry::BoundingBox;
use crate::math::Vec2;

/// Static terrain shape: a sampled height field over a horizontal span.
///
/// Height generation is an external concern; the shape only stores the
/// sampled surface and answers lookup queries. Samples are spaced
/// `ground_resolution` apart, starting at the left edge of the span.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    /// World-space center of the covered span (cell-local).
    pub center: Vec2,
    /// Horizontal extent covered by the samples.
    pub width: f64,
    /// Horizontal spacing between neighbouring samples.
    pub ground_resolution: f64,
    samples: Vec<f64>,
    bounding_box: BoundingBox,
}

impl Terrain {
    /// Builds a terrain from pre-generated surface samples. The sample count
    /// must cover the whole span, one sample per grid step plus the right
    /// edge.
    pub fn new(center: Vec2, width: f64, ground_resolution: f64, samples: Vec<f64>) -> Self {
        assert!(width > 0.0 && ground_resolution > 0.0);
        assert!(
            samples.len() >= (width / ground_resolution) as usize + 1,
            "not enough samples to cover the terrain span"
        );
        let mut terrain = Self {
            center,
            width,
            ground_resolution,
            samples,
            bounding_box: BoundingBox::new(),
        };
        terrain.rebuild_bounding_box();
        terrain
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_box_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounding_box
    }

    /// Left edge of the covered span.
    pub fn left(&self) -> f64 {
        self.center.x - self.width * 0.5
    }

    /// Right edge of the covered span.
    pub fn right(&self) -> f64 {
        self.center.x + self.width * 0.5
    }

    /// Surface height at world x. Positions outside the span clamp to the
    /// nearest edge sample.
    pub fn surface(&self, x: f64) -> f64 {
        let idx = ((x - self.left()) / self.ground_resolution) as isize;
        let idx = idx.clamp(0, self.samples.len() as isize - 1) as usize;
        self.samples[idx]
    }

    /// Snaps world x down onto the sample grid.
    pub fn snap_to_grid(&self, x: f64) -> f64 {
        let left = self.left();
        left + ((x - left) / self.ground_resolution).floor() * self.ground_resolution
    }

    /// Terrain is static: the rigid transform is ignored and only the
    /// bounding box is refreshed.
    pub fn transform(&mut self, _angle: f64, _position: Vec2) {
        self.rebuild_bounding_box();
    }

    fn rebuild_bounding_box(&mut self) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &s in &self.samples {
            min = min.min(s);
            max = max.max(s);
        }
        self.bounding_box
            .set_lower_left(Vec2::new(self.left(), min));
        self.bounding_box
            .set_upper_right(Vec2::new(self.right(), max));
    }
}
