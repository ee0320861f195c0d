pub mod coords;

pub use coords::{
    cell_to_world, clip_to_world_limit, separate_center_cell, Cell, CELL_SIZE, HALF_CELL_SIZE,
    WORLD_LIMIT,
};
