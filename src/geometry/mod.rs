pub mod bounding_box;
pub mod circle;
pub mod double_buffered;
pub mod planet;
pub mod polygon;
pub mod shape;
pub mod terrain;

pub use bounding_box::BoundingBox;
pub use circle::Circle;
pub use double_buffered::DoubleBufferedShape;
pub use planet::Planet;
pub use polygon::{Polygon, PolygonKind};
pub use shape::Shape;
pub use terrain::Terrain;
