use clap::Parser;

use product_service::bootstrap::cli::{print_version, Cli, Commands, ServerArgs};
use product_service::comm::{init_tracing, AppSettings, ConfigManager, ConfigSource};
use product_service::AppBootstrap;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => handle_server_command(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// 处理服务器启动命令：命令行参数优先于配置文件与环境变量
async fn handle_server_command(args: ServerArgs) -> anyhow::Result<()> {
    let config_manager = ConfigManager::with_sources(vec![ConfigSource::Memory(args.overrides())])?;
    let settings = AppSettings::load(&config_manager)?;
    settings.validate()?;

    init_tracing(&settings.logging)?;
    config_manager.log_sources();
    tracing::info!(
        addr = %settings.bind_addr(),
        backend = %settings.database.backend,
        "启动产品服务"
    );

    AppBootstrap::new(settings).run().await?;
    Ok(())
}
