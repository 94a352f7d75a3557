/// 通用模块：配置、日志
/// Common module: configuration and logging

pub mod config;
pub mod settings;
pub mod tracing;

pub use self::tracing::init_tracing;
pub use config::{ConfigError, ConfigManager, ConfigSource};
pub use settings::{AppSettings, DatabaseBackend, DatabaseSettings, LoggingSettings};
