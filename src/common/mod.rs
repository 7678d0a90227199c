//! Common types, traits, and error definitions for energy_path
//!
//! This module provides the foundational building blocks shared by the
//! ingestion, rasterization and search stages.

pub mod types;
pub mod traits;
pub mod error;
pub mod cancel;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use cancel::CancelToken;
