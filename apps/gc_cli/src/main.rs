// apps/gc_cli/src/main.rs

//! Gizmo Carver 命令行界面
//!
//! 把 Gizmo SPH 快照中的一个立方区域重采样到均匀网格，
//! 写出 RADMC-3D 谱线与尘埃辐射转移所需的输入文件。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Gizmo 快照切割工具
#[derive(Parser)]
#[command(name = "gc_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Carve Gizmo snapshots into RADMC-3D input files", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 切割快照并写出 RADMC-3D 输入
    Run(commands::run::RunArgs),
    /// 显示默认配置、静止频率和文件名表
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
