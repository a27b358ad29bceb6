pub mod app_config;
pub mod logging;

pub use app_config::{AppConfig, DatabaseConfig, LoggingConfig, ProviderConfig, ServerConfig};
pub use logging::init_logging;
