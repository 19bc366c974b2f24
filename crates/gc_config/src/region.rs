// crates/gc_config/src/region.rs

//! 切割区域
//!
//! 以 `center` 为中心、每侧延伸 `half_size` 的立方体，按 `dim³` 个均匀单元重采样。

use glam::DVec3;
use serde::{Deserialize, Serialize};

use gc_foundation::LengthUnit;

use crate::error::ConfigError;

/// 区域配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// `center` 与 `half_size` 的单位
    #[serde(default)]
    pub units: LengthUnit,

    /// 区域中心（如某个恒星核心的位置）
    #[serde(default = "default_center")]
    pub center: [f64; 3],

    /// 半边长 L/2
    #[serde(default = "default_half_size")]
    pub half_size: f64,

    /// 每个方向的单元数，输出网格为 dim × dim × dim
    #[serde(default = "default_dim")]
    pub dim: usize,
}

fn default_center() -> [f64; 3] { [48.550_524_41, 47.385_663_34, 49.656_611_56] }
fn default_half_size() -> f64 { 5.0 }
fn default_dim() -> usize { 256 }

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            units: LengthUnit::default(),
            center: default_center(),
            half_size: default_half_size(),
            dim: default_dim(),
        }
    }
}

impl RegionConfig {
    /// 区域中心 [cm]
    pub fn center_cm(&self) -> DVec3 {
        DVec3::from_array(self.center) * self.units.to_cm()
    }

    /// 半边长 [cm]
    pub fn half_size_cm(&self) -> f64 {
        self.half_size * self.units.to_cm()
    }

    /// 单元边长 [cm]
    pub fn cell_size_cm(&self) -> f64 {
        2.0 * self.half_size_cm() / self.dim as f64
    }

    /// 区域下角点 [cm]
    pub fn left_edge_cm(&self) -> DVec3 {
        self.center_cm() - DVec3::splat(self.half_size_cm())
    }

    /// 区域上角点 [cm]
    pub fn right_edge_cm(&self) -> DVec3 {
        self.center_cm() + DVec3::splat(self.half_size_cm())
    }

    /// 验证区域参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.half_size > 0.0) || !self.half_size.is_finite() {
            return Err(ConfigError::invalid("region.half_size", self.half_size, "半边长必须为正"));
        }
        if self.dim == 0 {
            return Err(ConfigError::invalid("region.dim", self.dim, "分辨率必须大于 0"));
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::invalid(
                "region.center",
                format!("{:?}", self.center),
                "中心坐标必须为有限值",
            ));
        }
        Ok(())
    }
}
