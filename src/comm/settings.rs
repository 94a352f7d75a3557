use crate::comm::config::{ConfigError, ConfigManager};
use std::fmt;
use std::str::FromStr;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 存储后端 / Storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Memory,
    Postgres,
}

impl FromStr for DatabaseBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidValue {
                key: "database.backend".to_string(),
                message: format!("不支持的存储后端: {}", other),
            }),
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub backend: String,
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub name: String,
    pub max_open: u32,
}

impl DatabaseSettings {
    pub fn backend(&self) -> Result<DatabaseBackend, ConfigError> {
        self.backend.parse()
    }
}

/// 应用配置（从 ConfigManager 读取的类型化视图）
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                json: false,
            },
            database: DatabaseSettings {
                backend: DatabaseBackend::Memory.to_string(),
                url: None,
                host: "127.0.0.1".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                pass: String::new(),
                name: "postgres".to_string(),
                max_open: 10,
            },
        }
    }
}

impl AppSettings {
    /// 从配置管理器加载：缺失项使用默认值，取值无效时返回错误
    pub fn load(mgr: &ConfigManager) -> Result<Self, ConfigError> {
        let d = Self::default();
        Ok(Self {
            server: ServerSettings {
                host: mgr.get_or("server.host", d.server.host)?,
                port: mgr.get_or("server.port", d.server.port)?,
                workers: mgr.get_opt("server.workers")?,
            },
            logging: LoggingSettings {
                level: mgr.get_or("logging.level", d.logging.level)?,
                json: mgr.get_or("logging.json", d.logging.json)?,
            },
            database: DatabaseSettings {
                backend: mgr.get_or("database.backend", d.database.backend)?,
                url: mgr.get_opt("database.url")?,
                host: mgr.get_or("database.host", d.database.host)?,
                port: mgr.get_or("database.port", d.database.port)?,
                user: mgr.get_or("database.user", d.database.user)?,
                pass: mgr.get_or("database.pass", d.database.pass)?,
                name: mgr.get_or("database.name", d.database.name)?,
                max_open: mgr.get_or("database.max_open", d.database.max_open)?,
            },
        })
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                message: "端口不能为 0".to_string(),
            });
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!("未知日志级别: {}", self.logging.level),
            });
        }
        if self.database.max_open == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_open".to_string(),
                message: "连接数必须大于 0".to_string(),
            });
        }
        self.database.backend()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
