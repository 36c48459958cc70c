//! Configuration module
//!
//! - Path resolution for data, settings and the audit log
//! - User preference persistence

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::Settings;
