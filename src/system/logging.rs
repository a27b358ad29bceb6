//! Logging system initialization
//!
//! Sets up the tracing subscriber from the application configuration.
//!
//! **Note**: This should be called only once during application startup,
//! after the configuration has been loaded.

use tracing_subscriber;

use super::app_config::LoggingConfig;

/// Initialize the logging system based on configuration
///
/// # Panics
/// * If setting the global subscriber fails (e.g., already initialized)
pub fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(config.level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .init();
}
