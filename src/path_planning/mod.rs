// Path planning for the room energy animation

pub mod bfs;
pub mod exit_selector;
pub mod energy_path;

pub use bfs::*;
pub use exit_selector::*;
pub use energy_path::*;
