//! Common utility functions.

pub mod data;
pub mod fs;

// Re-export commonly used items
pub use data::{deep_merge, load_yaml};
pub use fs::expand_path;
