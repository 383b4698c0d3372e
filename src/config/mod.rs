mod app_config;

pub use app_config::{ApiConfig, AppConfig, AuthConfig, LogFormat, LoggingConfig};
