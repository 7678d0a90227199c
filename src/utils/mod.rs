//! Utility modules for energy_path

pub mod grid_map;
pub mod visualization;

pub use grid_map::*;
pub use visualization::{colors, PathStyle, Visualizer};
