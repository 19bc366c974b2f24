// crates/gc_config/src/snapshot.rs

//! Gizmo 快照配置
//!
//! 快照编号、HDF5 目录和代码单位基。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// 快照配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// 快照编号（保持字符串，保留前导零）
    #[serde(default = "default_snap")]
    pub snap: String,

    /// HDF5 文件所在目录
    #[serde(default = "default_hdf5_dir")]
    pub hdf5_dir: PathBuf,

    /// 文件名模式，`{snap}` 替换为快照编号
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// 代码单位基
    #[serde(default)]
    pub unit_base: UnitBase,
}

fn default_snap() -> String { "2000".to_string() }
fn default_hdf5_dir() -> PathBuf { PathBuf::from(".") }
fn default_file_pattern() -> String { "snapshot_{snap}.hdf5".to_string() }

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            snap: default_snap(),
            hdf5_dir: default_hdf5_dir(),
            file_pattern: default_file_pattern(),
            unit_base: UnitBase::default(),
        }
    }
}

impl SnapshotConfig {
    /// 快照文件名
    pub fn file_name(&self) -> String {
        self.file_pattern.replace("{snap}", &self.snap)
    }

    /// 快照完整路径
    pub fn hdf5_path(&self) -> PathBuf {
        self.hdf5_dir.join(self.file_name())
    }

    /// 验证
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snap.trim().is_empty() {
            return Err(ConfigError::Missing("snapshot.snap".to_string()));
        }
        if !self.file_pattern.contains("{snap}") {
            return Err(ConfigError::invalid(
                "snapshot.file_pattern",
                &self.file_pattern,
                "文件名模式必须包含 {snap}",
            ));
        }
        self.unit_base.validate()
    }
}

/// 代码单位基（CGS）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitBase {
    /// 磁场单位 [G]
    #[serde(rename = "UnitMagneticField_in_gauss", default = "default_magnetic")]
    pub magnetic_field_in_gauss: f64,
    /// 长度单位 [cm]
    #[serde(rename = "UnitLength_in_cm", default = "default_length")]
    pub length_in_cm: f64,
    /// 质量单位 [g]
    #[serde(rename = "UnitMass_in_g", default = "default_mass")]
    pub mass_in_g: f64,
    /// 速度单位 [cm/s]
    #[serde(rename = "UnitVelocity_in_cm_per_s", default = "default_velocity")]
    pub velocity_in_cm_per_s: f64,
}

fn default_magnetic() -> f64 { 1e4 }
fn default_length() -> f64 { 3.08568e18 }
fn default_mass() -> f64 { 1.989e33 }
fn default_velocity() -> f64 { 100.0 }

impl Default for UnitBase {
    fn default() -> Self {
        Self {
            magnetic_field_in_gauss: default_magnetic(),
            length_in_cm: default_length(),
            mass_in_g: default_mass(),
            velocity_in_cm_per_s: default_velocity(),
        }
    }
}

impl UnitBase {
    /// 密度单位 [g/cm³]
    #[inline]
    pub fn density_in_cgs(&self) -> f64 {
        self.mass_in_g / self.length_in_cm.powi(3)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("snapshot.unit_base.UnitMagneticField_in_gauss", self.magnetic_field_in_gauss),
            ("snapshot.unit_base.UnitLength_in_cm", self.length_in_cm),
            ("snapshot.unit_base.UnitMass_in_g", self.mass_in_g),
            ("snapshot.unit_base.UnitVelocity_in_cm_per_s", self.velocity_in_cm_per_s),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::invalid(key, value, "单位必须为正的有限值"));
            }
        }
        Ok(())
    }
}
