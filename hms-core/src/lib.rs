//! HMS Core - shared infrastructure for the HMS workspace
//!
//! This crate defines the error handling and logging foundations used by the rest of the system

pub mod error;
pub mod logging;

pub use error::*;
pub use logging::*;

// Re-export commonly used external types
pub use tracing;
