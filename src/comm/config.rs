use anyhow::{anyhow, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// 环境变量前缀，如 PRODUCT_SERVER__PORT=9000
/// Environment variable prefix, e.g. PRODUCT_SERVER__PORT=9000
pub const ENV_PREFIX: &str = "PRODUCT";

/// 选择环境配置文件的变量 / Variable selecting the environment config file
pub const APP_ENV_VAR: &str = "APP_ENV";

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置项 '{key}' 不存在")]
    KeyNotFound { key: String },
    #[error("配置项 '{key}' 取值无效: {message}")]
    InvalidValue { key: String, message: String },
    #[error("配置初始化失败: {message}")]
    InitializationError { message: String },
}

/// 配置数据源信息
#[derive(Debug, Clone)]
pub struct ConfigSourceInfo {
    pub source_type: String,
    pub description: String,
    pub priority: u8,
    pub loaded: bool,
}

/// 配置管理器
pub struct ConfigManager {
    config: Config,
    sources_info: Vec<ConfigSourceInfo>,
}

impl ConfigManager {
    /// 默认配置源 + 额外配置源，后者优先级最高
    /// 优先级：额外配置源 > 环境变量 > config/<APP_ENV>.toml > config/default.toml
    pub fn with_sources(sources: Vec<ConfigSource>) -> Result<Self> {
        let app_env = std::env::var(APP_ENV_VAR).unwrap_or_else(|_| "development".to_string());
        let default_sources = vec![
            ConfigSource::File {
                path: "config/default.toml".to_string(),
                format: Some(FileFormat::Toml),
                required: false,
            },
            ConfigSource::File {
                path: format!("config/{}.toml", app_env),
                format: Some(FileFormat::Toml),
                required: false,
            },
            ConfigSource::Env {
                prefix: ENV_PREFIX.to_string(),
                separator: "__",
            },
        ];
        Self::from_sources(default_sources.into_iter().chain(sources).collect())
    }

    /// 只使用给定配置源（按优先级从低到高，后添加者优先生效）
    pub fn from_sources(sources: Vec<ConfigSource>) -> Result<Self> {
        let mut builder = Config::builder();
        let mut sources_info = Vec::new();

        for (index, source) in sources.into_iter().enumerate() {
            let info = source.get_source_info(index as u8 + 1);

            if let ConfigSource::File { path, required, .. } = &source {
                let file_exists = std::path::Path::new(path).exists();
                if !file_exists && *required {
                    return Err(ConfigError::InitializationError {
                        message: format!("必需的配置文件不存在: {}", path),
                    }
                    .into());
                }
                if !file_exists {
                    // 可选文件不存在，记录但不添加
                    sources_info.push(info);
                    continue;
                }
            }

            builder = source
                .add_to_builder(builder)
                .map_err(|e| anyhow!("添加配置源失败: {}", e))?;
            sources_info.push(ConfigSourceInfo {
                loaded: true,
                ..info
            });
        }

        let config = builder.build().map_err(|e| ConfigError::InitializationError {
            message: format!("构建配置失败: {}", e),
        })?;
        Ok(Self {
            config,
            sources_info,
        })
    }

    /// 获取指定 key 的配置值；缺失为 KeyNotFound，类型不符为 InvalidValue
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> std::result::Result<T, ConfigError> {
        self.config.get(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::KeyNotFound {
                key: key.to_string(),
            },
            other => ConfigError::InvalidValue {
                key: key.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// 可选配置项：仅在缺失时返回 None，取值无效仍然报错
    pub fn get_opt<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> std::result::Result<Option<T>, ConfigError> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::KeyNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 缺失时使用默认值，取值无效仍然报错
    pub fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> std::result::Result<T, ConfigError> {
        Ok(self.get_opt(key)?.unwrap_or(default))
    }

    /// 获取所有配置源信息
    pub fn sources_info(&self) -> &[ConfigSourceInfo] {
        &self.sources_info
    }

    /// 记录配置源加载情况
    pub fn log_sources(&self) {
        for info in &self.sources_info {
            tracing::info!(
                priority = info.priority,
                loaded = info.loaded,
                "config source {}: {}",
                info.source_type,
                info.description
            );
        }
    }
}

/// 配置源类型
pub enum ConfigSource {
    /// 文件配置源
    File {
        path: String,
        format: Option<FileFormat>,
        required: bool,
    },
    /// 环境变量配置源
    Env {
        prefix: String,
        separator: &'static str,
    },
    /// 内存配置源，key 使用点号路径（如 server.port）
    Memory(HashMap<String, serde_json::Value>),
    /// 字符串配置源
    String { content: String, format: FileFormat },
}

impl ConfigSource {
    /// 获取配置源信息
    pub fn get_source_info(&self, priority: u8) -> ConfigSourceInfo {
        let (source_type, description) = match self {
            ConfigSource::File { path, required, .. } => (
                "File",
                format!("文件配置源: {} (必需: {})", path, required),
            ),
            ConfigSource::Env { prefix, separator } => (
                "Environment",
                format!("环境变量配置源: 前缀={}, 分隔符={}", prefix, separator),
            ),
            ConfigSource::Memory(map) => ("Memory", format!("内存配置源: {} 个配置项", map.len())),
            ConfigSource::String { .. } => ("String", "字符串配置源".to_string()),
        };
        ConfigSourceInfo {
            source_type: source_type.to_string(),
            description,
            priority,
            loaded: false,
        }
    }

    pub fn add_to_builder(
        self,
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        match self {
            ConfigSource::File {
                path,
                format,
                required,
            } => {
                let file_source = match format {
                    Some(format) => File::with_name(&path).format(format),
                    None => File::with_name(&path),
                };
                Ok(builder.add_source(file_source.required(required)))
            }
            ConfigSource::Env { prefix, separator } => Ok(builder.add_source(
                Environment::with_prefix(&prefix)
                    .separator(separator)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .ignore_empty(true),
            )),
            ConfigSource::Memory(map) => {
                let json_content = serde_json::to_string(&nest_keys(map))
                    .map_err(|e| anyhow!("序列化内存配置失败: {}", e))?;
                Ok(builder.add_source(File::from_str(&json_content, FileFormat::Json)))
            }
            ConfigSource::String { content, format } => {
                Ok(builder.add_source(File::from_str(&content, format)))
            }
        }
    }
}

/// 将点号路径展开为嵌套对象：{"server.port": 1} -> {"server": {"port": 1}}
fn nest_keys(map: HashMap<String, serde_json::Value>) -> serde_json::Value {
    let mut root = serde_json::Map::new();
    for (key, value) in map {
        let mut parts: Vec<&str> = key.split('.').collect();
        let Some(last) = parts.pop() else { continue };
        let mut node = &mut root;
        for part in parts {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if !entry.is_object() {
                *entry = serde_json::Value::Object(serde_json::Map::new());
            }
            node = match entry {
                serde_json::Value::Object(inner) => inner,
                _ => unreachable!("entry was just made an object"),
            };
        }
        node.insert(last.to_string(), value);
    }
    serde_json::Value::Object(root)
}
