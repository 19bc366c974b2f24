// crates/gc_config/src/carver_config.rs

//! CarverConfig - 切割运行的顶层配置
//!
//! 一个 JSON 文件描述一次运行：物理常数、区域、快照、路径、波长、
//! 目标分子和输出文件名。缺省的字段取参考参数文件中的值。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::output_names::OutputNames;
use crate::physics::PhysicsConstants;
use crate::region::RegionConfig;
use crate::snapshot::SnapshotConfig;
use crate::species::{Chemistry, Species, Transition};

/// 切割配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarverConfig {
    /// 物理常数
    #[serde(default)]
    pub physics: PhysicsConstants,

    /// 切割区域
    #[serde(default)]
    pub region: RegionConfig,

    /// 快照
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// 输入输出目录
    #[serde(default)]
    pub paths: PathsConfig,

    /// 波长文件参数
    #[serde(default)]
    pub wavelength: WavelengthConfig,

    /// 需要生成数密度的分子
    #[serde(default = "default_species")]
    pub species: Vec<SpeciesOutput>,

    /// 需要生成相机波长文件的跃迁
    #[serde(default = "default_transitions")]
    pub transitions: Vec<Transition>,

    /// 是否用吸积记录屏蔽分子丰度
    #[serde(default)]
    pub mask_abundance: bool,

    /// 吸积记录
    #[serde(default)]
    pub accretion: AccretionConfig,

    /// 微湍流模型
    #[serde(default)]
    pub microturbulence: MicroturbulenceModel,

    /// 粒子到网格的插值方式
    #[serde(default)]
    pub deposit: DepositMethod,

    /// 输出文件名
    #[serde(default)]
    pub outputs: OutputNames,
}

fn default_species() -> Vec<SpeciesOutput> {
    vec![SpeciesOutput::default()]
}

fn default_transitions() -> Vec<Transition> {
    vec![Transition::J1_0]
}

impl Default for CarverConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConstants::default(),
            region: RegionConfig::default(),
            snapshot: SnapshotConfig::default(),
            paths: PathsConfig::default(),
            wavelength: WavelengthConfig::default(),
            species: default_species(),
            transitions: default_transitions(),
            mask_abundance: false,
            accretion: AccretionConfig::default(),
            microturbulence: MicroturbulenceModel::default(),
            deposit: DepositMethod::default(),
            outputs: OutputNames::default(),
        }
    }
}

/// 目录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// 非本程序生成、但 RADMC-3D 运行需要的文件所在目录
    ///
    /// 包括 dustkappa、dustopac、radmc3d.inp 和 molecule_*.inp。
    #[serde(default = "default_existing_filepath")]
    pub existing_filepath: PathBuf,

    /// 输出根目录，每次运行在其下建立一个工作目录
    #[serde(default = "default_output_filepath")]
    pub output_filepath: PathBuf,
}

fn default_existing_filepath() -> PathBuf { PathBuf::from("default_files") }
fn default_output_filepath() -> PathBuf { PathBuf::from("output_files") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            existing_filepath: default_existing_filepath(),
            output_filepath: default_output_filepath(),
        }
    }
}

/// 波长文件参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavelengthConfig {
    /// 生成 lines.inp，而不是从已有文件目录复制
    #[serde(default = "default_true")]
    pub write_line_file: bool,
    /// 相机波长覆盖的速度范围 ±vmax [km/s]
    #[serde(default = "default_vmax")]
    pub vmax: f64,
    /// 相机波长点数
    #[serde(default = "default_nwav")]
    pub nwav: usize,
    /// 连续谱波长下限 [μm]
    #[serde(default = "default_lambda_min")]
    pub lambda_min: f64,
    /// 连续谱波长上限 [μm]
    #[serde(default = "default_lambda_max")]
    pub lambda_max: f64,
    /// 连续谱波长点数（对数等距）
    #[serde(default = "default_n_lambda")]
    pub n_lambda: usize,
}

fn default_true() -> bool { true }
fn default_vmax() -> f64 { 20.0 }
fn default_nwav() -> usize { 256 }
fn default_lambda_min() -> f64 { 0.1 }
fn default_lambda_max() -> f64 { 1e4 }
fn default_n_lambda() -> usize { 100 }

impl Default for WavelengthConfig {
    fn default() -> Self {
        Self {
            write_line_file: true,
            vmax: default_vmax(),
            nwav: default_nwav(),
            lambda_min: default_lambda_min(),
            lambda_max: default_lambda_max(),
            n_lambda: default_n_lambda(),
        }
    }
}

/// 丰度来源
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbundanceSource {
    /// 使用 `physics.molecular_abundance`
    #[default]
    Global,
    /// 指定常数（相对 H2）
    Constant(f64),
    /// 快照中的逐粒子丰度字段（PartType0）
    Field(String),
}

/// 单个分子的数密度输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesOutput {
    /// 分子
    pub species: Species,
    /// 化学网络
    #[serde(default)]
    pub chemistry: Chemistry,
    /// 主同位素丰度来源；同位素体再乘同位素比
    #[serde(default)]
    pub abundance: AbundanceSource,
}

impl Default for SpeciesOutput {
    fn default() -> Self {
        Self {
            species: Species::Co,
            chemistry: Chemistry::Despotic,
            abundance: AbundanceSource::Global,
        }
    }
}

/// 吸积记录配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccretionConfig {
    /// 吸积记录文件（空白分隔的数值表）
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// sink 粒子 ID 所在列（从 0 开始）
    #[serde(default = "default_sink_column")]
    pub sink_column: usize,
    /// 被吸积气体粒子 ID 所在列（从 0 开始）
    #[serde(default = "default_gas_column")]
    pub gas_column: usize,
}

fn default_sink_column() -> usize { 1 }
fn default_gas_column() -> usize { 6 }

impl Default for AccretionConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            sink_column: default_sink_column(),
            gas_column: default_gas_column(),
        }
    }
}

/// 微湍流模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroturbulenceModel {
    /// 所有粒子取 `physics.microturbulence_speed`
    #[default]
    Constant,
    /// 线宽-尺度关系 0.72 (L/1pc)^0.56 km/s，L 取重采样单元边长
    LinewidthSize,
}

/// 粒子到网格的插值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositMethod {
    /// SPH 三次样条核散射
    #[default]
    Scatter,
    /// 质量加权最近网格点
    Nearest,
}

impl CarverConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;

        let config: CarverConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 运行标签，如 `sn2000_256_`
    pub fn tag(&self) -> String {
        format!("sn{}_{}_", self.snapshot.snap, self.region.dim)
    }

    /// 本次运行的工作目录
    pub fn run_directory(&self) -> PathBuf {
        self.paths
            .output_filepath
            .join(self.tag().trim_end_matches('_'))
    }

    /// 输出中涉及的所有分子（去重，保持配置顺序）
    pub fn species_list(&self) -> Vec<Species> {
        let mut list: Vec<Species> = Vec::new();
        for output in &self.species {
            if !list.contains(&output.species) {
                list.push(output.species);
            }
        }
        list
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physics.validate()?;
        self.region.validate()?;
        self.snapshot.validate()?;

        if !(self.wavelength.vmax > 0.0) {
            return Err(ConfigError::invalid("wavelength.vmax", self.wavelength.vmax, "速度范围必须为正"));
        }
        if self.wavelength.nwav < 2 {
            return Err(ConfigError::invalid("wavelength.nwav", self.wavelength.nwav, "至少需要 2 个波长点"));
        }
        if !(self.wavelength.lambda_min > 0.0 && self.wavelength.lambda_max > self.wavelength.lambda_min) {
            return Err(ConfigError::invalid(
                "wavelength.lambda_min",
                self.wavelength.lambda_min,
                "需要 0 < lambda_min < lambda_max",
            ));
        }
        if self.wavelength.n_lambda < 2 {
            return Err(ConfigError::invalid(
                "wavelength.n_lambda",
                self.wavelength.n_lambda,
                "至少需要 2 个波长点",
            ));
        }

        for (i, output) in self.species.iter().enumerate() {
            match &output.abundance {
                AbundanceSource::Constant(x) if !(*x > 0.0 && *x <= 1.0) => {
                    return Err(ConfigError::invalid(
                        &format!("species[{i}].abundance"),
                        x,
                        "丰度必须在 (0, 1] 范围内",
                    ));
                }
                AbundanceSource::Field(name) if name.trim().is_empty() => {
                    return Err(ConfigError::Missing(format!("species[{i}].abundance")));
                }
                _ => {}
            }
        }

        if self.mask_abundance && self.accretion.log_path.is_none() {
            return Err(ConfigError::Missing("accretion.log_path".to_string()));
        }
        if self.accretion.sink_column == self.accretion.gas_column {
            return Err(ConfigError::invalid(
                "accretion.gas_column",
                self.accretion.gas_column,
                "sink 列与气体列不能相同",
            ));
        }
        Ok(())
    }
}
