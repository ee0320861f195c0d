use crate::geometry::BoundingBox;
use crate::math::Vec2;

/// How a polygon's vertex list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
    /// Closed outline with a filled interior.
    Filled,
    /// Closed outline, hollow.
    LineLoop,
    /// Open polyline; no edge between the last and first vertex.
    LineStrip,
}

impl PolygonKind {
    /// Closed kinds contribute the edge from the last back to the first
    /// vertex in collision tests.
    pub fn is_closed(self) -> bool {
        !matches!(self, PolygonKind::LineStrip)
    }
}

/// Polygon shape: rest-pose vertices plus the transformed current vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub kind: PolygonKind,
    /// Vertices in the body frame, untouched by `transform`.
    pub vertices_rest: Vec<Vec2>,
    /// Vertices in cell-local world coordinates after the last `transform`.
    pub vertices: Vec<Vec2>,
    bounding_box: BoundingBox,
}

impl Polygon {
    pub fn new(kind: PolygonKind, vertices_rest: Vec<Vec2>) -> Self {
        assert!(
            vertices_rest.len() >= 2,
            "polygon needs at least two vertices"
        );
        let vertices = vertices_rest.clone();
        let mut polygon = Self {
            kind,
            vertices_rest,
            vertices,
            bounding_box: BoundingBox::new(),
        };
        polygon.rebuild_bounding_box();
        polygon
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_box_mut(&mut self) -> &mut BoundingBox {
        &mut self.bounding_box
    }

    /// Number of edges, including the closing edge for closed kinds.
    pub fn edge_count(&self) -> usize {
        if self.kind.is_closed() {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// Vertex index pair of edge `i`; the last edge of a closed polygon wraps
    /// back to vertex 0.
    pub fn edge_indices(&self, i: usize) -> (usize, usize) {
        let n = self.vertices.len();
        (i % n, (i + 1) % n)
    }

    /// Applies a rigid transform: every rest vertex is rotated about the body
    /// origin and translated, then the bounding box is rebuilt from the new
    /// vertex set.
    pub fn transform(&mut self, angle: f64, position: Vec2) {
        for (v, rest) in self.vertices.iter_mut().zip(&self.vertices_rest) {
            *v = rest.rotate(angle) + position;
        }
        self.rebuild_bounding_box();
    }

    fn rebuild_bounding_box(&mut self) {
        self.bounding_box.reset_to_point(self.vertices[0]);
        for v in &self.vertices[1..] {
            self.bounding_box.update_point(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-10;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn test_edge_count_by_kind() {
        assert_eq!(Polygon::new(PolygonKind::Filled, square()).edge_count(), 4);
        assert_eq!(Polygon::new(PolygonKind::LineLoop, square()).edge_count(), 4);
        assert_eq!(Polygon::new(PolygonKind::LineStrip, square()).edge_count(), 3);
    }

    #[test]
    fn test_closing_edge_wraps() {
        let p = Polygon::new(PolygonKind::LineLoop, square());
        assert_eq!(p.edge_indices(3), (3, 0));
    }

    #[test]
    fn test_transform_updates_vertices_and_box() {
        let mut p = Polygon::new(PolygonKind::Filled, square());
        p.transform(PI, Vec2::new(10.0, 0.0));
        // 180 degree rotation mirrors each vertex through the origin
        assert!((p.vertices[0].x - 11.0).abs() < EPSILON);
        assert!((p.vertices[0].y - 1.0).abs() < EPSILON);
        assert!((p.bounding_box().lower_left().x - 9.0).abs() < EPSILON);
        assert!((p.bounding_box().upper_right().x - 11.0).abs() < EPSILON);
        // Rest pose is untouched
        assert_eq!(p.vertices_rest, square());
    }
}
