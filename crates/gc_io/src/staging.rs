// crates/gc_io/src/staging.rs

//! 复制外部文件到运行目录
//!
//! 尘埃不透明度、RADMC-3D 主参数和分子数据不由本程序生成，
//! 从 `paths.existing_filepath` 复制。缺失的文件只记录警告。

use gc_config::CarverConfig;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{IoError, IoResult};

/// 复制结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// 已复制的文件名
    pub copied: Vec<String>,
    /// 源目录中缺失的文件名
    pub missing: Vec<String>,
}

impl StageReport {
    /// 是否全部复制成功
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 需要从已有文件目录复制的文件名
pub fn staged_file_names(config: &CarverConfig) -> Vec<String> {
    let names = &config.outputs;
    let mut files = vec![
        names.dust_kappa.clone(),
        names.dust_opac.clone(),
        names.radmc3d_inp.clone(),
    ];
    for species in config.species_list() {
        files.push(names.molecule(species));
        if !config.wavelength.write_line_file {
            files.push(names.lines(species));
        }
    }
    files
}

/// 复制外部文件到 `run_dir`
pub fn stage_existing_files(config: &CarverConfig, run_dir: &Path) -> IoResult<StageReport> {
    let source_dir = &config.paths.existing_filepath;
    let mut report = StageReport::default();

    for name in staged_file_names(config) {
        let source = source_dir.join(&name);
        if !source.is_file() {
            warn!(file = %source.display(), "外部文件不存在，跳过");
            report.missing.push(name);
            continue;
        }
        let target = run_dir.join(&name);
        std::fs::copy(&source, &target).map_err(|e| IoError::access(&target, e))?;
        report.copied.push(name);
    }

    info!(
        copied = report.copied.len(),
        missing = report.missing.len(),
        "外部文件复制完成"
    );
    Ok(report)
}
