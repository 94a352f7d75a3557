use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::collections::HashMap;

/// 命令行入口
#[derive(Debug, Parser)]
#[command(name = "product-service", version, about = "产品目录 Web 服务")]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 启动 Web 服务器
    Server(ServerArgs),
    /// 显示版本信息
    Version,
}

/// server 子命令参数，未指定的项沿用配置文件与环境变量
#[derive(Debug, Default, Args)]
pub struct ServerArgs {
    /// 监听地址
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// 工作线程数
    #[arg(short, long, value_name = "WORKERS")]
    pub workers: Option<usize>,

    /// 存储后端 (memory | postgres)
    #[arg(long, value_name = "BACKEND")]
    pub backend: Option<String>,
}

impl ServerArgs {
    /// 转换为内存配置源使用的覆盖项（点号路径）
    pub fn overrides(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        if let Some(host) = &self.host {
            map.insert("server.host".to_string(), Value::from(host.clone()));
        }
        if let Some(port) = self.port {
            map.insert("server.port".to_string(), Value::from(port));
        }
        if let Some(workers) = self.workers {
            map.insert("server.workers".to_string(), Value::from(workers));
        }
        if let Some(backend) = &self.backend {
            map.insert("database.backend".to_string(), Value::from(backend.clone()));
        }
        map
    }
}

/// 打印版本信息
pub fn print_version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_with_overrides() {
        let cli = Cli::try_parse_from([
            "product-service",
            "server",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--backend",
            "postgres",
        ])
        .unwrap();

        let Commands::Server(args) = cli.command else {
            panic!("expected server command");
        };
        let overrides = args.overrides();
        assert_eq!(overrides["server.host"], "127.0.0.1");
        assert_eq!(overrides["server.port"], 9090);
        assert_eq!(overrides["database.backend"], "postgres");
        assert!(!overrides.contains_key("server.workers"));
    }

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["product-service", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["product-service"]).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["product-service", "server", "--port", "http"]).is_err());
    }

    #[test]
    fn test_no_flags_no_overrides() {
        assert!(ServerArgs::default().overrides().is_empty());
    }
}
