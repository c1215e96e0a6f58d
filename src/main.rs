use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bizdir::config::load_config;
use bizdir::migration::{connect, Migrator};
use bizdir::{api, verification, AppState};

#[derive(Parser)]
#[command(name = "bizdir", version, about = "商家目录服务 - 广告位统计、正规化基金与商家互动记录")]
struct Cli {
    /// 配置文件路径
    #[arg(long, default_value = "bizdir.toml")]
    config: PathBuf,

    /// 覆盖配置中的 HTTP 端口
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化 tracing 日志系统
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    // 读取配置
    let mut config = load_config(&cli.config)?;
    if let Some(port) = cli.port {
        config.web_port = port;
    }
    info!("📋 bizdir 启动");
    info!("🌐 Web端口: {}", config.web_port);
    info!("⏱️ 验证码有效期: {} 分钟", config.verification_ttl_minutes);

    // 初始化数据库并运行迁移
    let db = connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("✅ 数据库初始化完成");

    let sweep_interval = config.expiry_sweep_interval();
    let app_state = AppState::new(db.clone(), config);

    // 启动 Web API 服务
    let _web_handle = api::start_web_server(app_state);

    // 启动过期验证码清理
    verification::start_expiry_sweeper(db, sweep_interval);

    info!("✅ 所有服务已启动，等待终止信号...");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("收到 Ctrl+C 信号，正在关闭服务...");
        }
        result = terminate_signal() => {
            result?;
            info!("收到 SIGTERM 信号，正在关闭服务...");
        }
    }

    Ok(())
}

#[cfg(unix)]
async fn terminate_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};
    let mut sigterm = signal(SignalKind::terminate())?;
    sigterm.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate_signal() -> Result<()> {
    std::future::pending::<()>().await;
    Ok(())
}
