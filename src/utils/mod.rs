//! Utility modules
//!
//! Provides logging setup and configuration path expansion.

pub mod logging;
pub mod paths;

pub use logging::init_logging;
pub use paths::expand_path;
