// apps/gc_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 检查配置能否解析、参数是否有效，并对可能导致运行失败的
//! 外部文件缺失给出警告。

use anyhow::{bail, Context, Result};
use clap::Args;
use gc_config::CarverConfig;
use gc_io::staging::staged_file_names;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 单元数超过该值时提示内存占用
const LARGE_GRID_CELLS: usize = 512 * 512 * 512;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== Gizmo Carver 配置验证 ===");

    let mut result = ValidationResult::default();
    validate_config(&args.config, &mut result)?;
    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) -> Result<()> {
    println!("\n检查配置文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return Ok(());
    }

    let content = std::fs::read_to_string(path).context("无法读取配置文件")?;
    let config: CarverConfig = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("JSON 解析错误: {e}"));
            return Ok(());
        }
    };

    if let Err(e) = config.validate() {
        result.add_error(e.to_string());
        return Ok(());
    }
    println!("  ✓ 配置参数有效");

    check_warnings(&config, result);
    Ok(())
}

/// 不阻止运行、但值得注意的情况
pub fn check_warnings(config: &CarverConfig, result: &mut ValidationResult) {
    let cells = config.region.dim.pow(3);
    if cells > LARGE_GRID_CELLS {
        result.add_warning(format!(
            "网格 {}³ 每个字段约占 {:.1} GB 内存",
            config.region.dim,
            cells as f64 * 8.0 / 1e9
        ));
    }

    let mut seen = HashSet::new();
    for output in &config.species {
        if !seen.insert(output.species) {
            result.add_warning(format!(
                "分子 {} 出现多次，作业脚本 {} 会被覆盖",
                output.species,
                config.outputs.job_script(output.species)
            ));
        }
    }

    let dv = 2.0 * config.wavelength.vmax / (config.wavelength.nwav - 1) as f64;
    if dv > 1.0 {
        result.add_warning(format!("相机速度分辨率 {dv:.2} km/s 较粗"));
    }

    if config.accretion.log_path.is_some() && !config.mask_abundance {
        result.add_warning("提供了吸积记录但 mask_abundance = false，分子场不会被屏蔽");
    }
    if let Some(log) = &config.accretion.log_path {
        if !log.is_file() {
            result.add_warning(format!("吸积记录不存在: {}", log.display()));
        }
    }

    let snapshot = config.snapshot.hdf5_path();
    if !snapshot.is_file() {
        result.add_warning(format!("快照不存在: {}", snapshot.display()));
    }

    let existing = &config.paths.existing_filepath;
    for name in staged_file_names(config) {
        if !existing.join(&name).is_file() {
            result.add_warning(format!("外部文件缺失: {}", existing.join(&name).display()));
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_config::SpeciesOutput;

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carver.json");
        std::fs::write(&path, r#"{"region": {"dim": 0}}"#).unwrap();

        let mut result = ValidationResult::default();
        validate_config(&path, &mut result).unwrap();
        assert!(!result.is_ok());
    }

    #[test]
    fn test_warnings() {
        let mut config = CarverConfig::default();
        config.species.push(SpeciesOutput::default());
        config.wavelength.nwav = 5;
        config.paths.existing_filepath = PathBuf::from("/nonexistent/default_files");

        let mut result = ValidationResult::default();
        check_warnings(&config, &mut result);
        assert!(result.is_ok());
        assert!(!result.is_ok_strict());
        assert!(result.warnings.iter().any(|w| w.contains("出现多次")));
        assert!(result.warnings.iter().any(|w| w.contains("速度分辨率")));
        assert!(result.warnings.iter().any(|w| w.contains("dustopac.inp")));
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let mut result = ValidationResult::default();
        result.add_warning("w");
        assert!(print_validation_result(&result, false).is_ok());
        assert!(print_validation_result(&result, true).is_err());
    }
}
