use anyhow::Result;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::comm::settings::LoggingSettings;

struct LogTimer;

impl fmt::time::FormatTime for LogTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},sqlx=warn", level)))
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"))
}

/// 初始化日志：RUST_LOG 优先，否则使用配置中的级别；json=true 时输出 Bunyan JSON
/// 重复初始化时静默忽略
pub fn init_tracing(settings: &LoggingSettings) -> Result<()> {
    let registry = Registry::default().with(build_filter(&settings.level));

    let result = if settings.json {
        let formatting_layer =
            BunyanFormattingLayer::new(env!("CARGO_PKG_NAME").into(), std::io::stdout);
        registry
            .with(JsonStorageLayer)
            .with(formatting_layer)
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(LogTimer)
                    .compact()
                    .with_target(false),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
