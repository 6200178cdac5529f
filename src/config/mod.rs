//! Configuration module for spendtrack
//!
//! - Data directory resolution
//! - User display settings

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
