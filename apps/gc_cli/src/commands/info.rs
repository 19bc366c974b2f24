// apps/gc_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示默认配置、静止频率表、输出文件名表，或某个配置的派生量。

use anyhow::{Context, Result};
use clap::Args;
use gc_config::{CarverConfig, Species, Transition};
use gc_fields::UniformGrid;
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（显示派生量）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,

    /// 显示静止频率表
    #[arg(long)]
    pub frequencies: bool,

    /// 显示输出文件名表
    #[arg(long)]
    pub outputs: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== Gizmo Carver 信息 ===");

    if let Some(path) = &args.config {
        let config = CarverConfig::from_file(path)
            .with_context(|| format!("无法加载配置: {}", path.display()))?;
        print_config_summary(&config)?;
    }

    if args.defaults {
        print_default_config()?;
    }

    if args.frequencies {
        print_frequencies();
    }

    if args.outputs {
        print_outputs(&CarverConfig::default());
    }

    if args.config.is_none() && !args.defaults && !args.frequencies && !args.outputs {
        // 默认显示所有信息
        print_default_config()?;
        println!();
        print_frequencies();
        println!();
        print_outputs(&CarverConfig::default());
    }

    Ok(())
}

fn print_config_summary(config: &CarverConfig) -> Result<()> {
    let physics = &config.physics;
    let grid = UniformGrid::from_region(&config.region)?;

    println!("=== 配置派生量 ===");
    println!("标签: {}", config.tag());
    println!("运行目录: {}", config.run_directory().display());
    println!("快照: {}", config.snapshot.hdf5_path().display());
    println!("平均分子量 μ: {:.6}", physics.mean_molecular_weight());
    println!("温度系数 C: {:.6e} K / (代码单位比内能)", physics.temperature_constant());
    println!(
        "区域: {:?} .. {:?} cm",
        config.region.left_edge_cm().to_array(),
        config.region.right_edge_cm().to_array()
    );
    println!("网格: {}³ = {} 单元, 边长 {:.4e} cm", grid.dim(), grid.n_cells(), grid.cell_size());
    println!("插值: {:?}, 微湍流: {:?}", config.deposit, config.microturbulence);
    for output in &config.species {
        println!(
            "分子: {} ({}), 丰度 {:?}, 同位素因子 {}",
            output.species,
            output.chemistry,
            output.abundance,
            output.species.isotope_factor(physics)
        );
    }
    println!();
    Ok(())
}

fn print_default_config() -> Result<()> {
    println!("=== 默认配置 ===");
    let json = serde_json::to_string_pretty(&CarverConfig::default())?;
    println!("{json}");
    Ok(())
}

fn print_frequencies() {
    println!("=== 静止频率 [GHz] ===");
    print!("{:<8}", "");
    for species in Species::ALL {
        print!("{:>12}", species.label());
    }
    println!();
    for transition in Transition::all() {
        print!("{:<8}", transition.to_string());
        for species in Species::ALL {
            print!("{:>12.6}", species.rest_frequency(transition) / 1e9);
        }
        println!();
    }
}

fn print_outputs(config: &CarverConfig) {
    println!("=== 输出文件名 ===");
    for (key, name) in config.outputs.table() {
        println!("  {key:<36} {name}");
    }
}
