//! Infrastructure layer
//!
//! Settings and logging for the library and the CLI.

mod config;
mod logging;

pub use config::Config;
pub use logging::init_logging;
