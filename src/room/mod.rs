//! Room description parsing and layout ingestion

pub mod layout;
pub mod ingest;

pub use layout::{Dimensions, Position, RoomDescription, RoomObject};
pub use ingest::{footprint_bounds, Obstacle, Opening, OpeningKind, RoomLayout};
