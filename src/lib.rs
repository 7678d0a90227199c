//! energy_path - route planning for the "energy entering the room" animation
//!
//! Given a room layout (furniture, doors, windows) this crate rasterizes the
//! room into an occupancy grid, picks the exit door and searches a
//! furniture-free corridor from the room origin out through that door.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod room;
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Point2D, Size2D, Path2D, GridNode, CancelToken};
pub use common::PathPlanner;
pub use common::{PlanError, PlanResult};
pub use path_planning::{EnergyPathConfig, EnergyPathPlanner, PlanOutcome};
