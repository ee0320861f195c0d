pub mod body;

pub use body::{Body, ALL_DEPTH_LAYERS};
