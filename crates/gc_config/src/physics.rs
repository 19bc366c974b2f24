// crates/gc_config/src/physics.rs

//! 派生字段使用的物理常数
//!
//! 组分比、同位素比、温度上限和分子数密度阈值。
//! 平均分子量与温度常数由氦质量分数和绝热指数直接算出。

use serde::{Deserialize, Serialize};

use gc_foundation::constants::{BOLTZMANN_MKS, MASS_HYDROGEN_MKS, SPECIFIC_ENERGY_SCALE};

use crate::error::ConfigError;

/// 物理常数配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConstants {
    /// 尘气质量比
    #[serde(default = "default_dust_to_gas")]
    pub dust_to_gas: f64,

    /// 每个 H2 分子的氢原子数
    #[serde(default = "default_mol_hydrogen_ratio")]
    pub mol_hydrogen_ratio: f64,

    /// 绝热指数（实际并非常数，这里取单原子气体近似）
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// 氦质量分数 Y（Gizmo 默认值）
    #[serde(default = "default_helium_mass_fraction")]
    pub helium_mass_fraction: f64,

    /// 13C/12C 同位素比
    #[serde(default = "default_c13_over_c12")]
    pub c13_over_c12: f64,

    /// 18O/16O 同位素比（TIMES, Yun et al. 2021）
    #[serde(default = "default_o18_over_o16")]
    pub o18_over_o16: f64,

    /// 目标分子相对 H2 的丰度
    #[serde(default = "default_molecular_abundance")]
    pub molecular_abundance: f64,

    /// 恒定微湍流速度 [cm/s]
    #[serde(default = "default_microturbulence_speed")]
    pub microturbulence_speed: f64,

    /// 温度上限 [K]，达到或超过该值的粒子温度置零
    #[serde(default = "default_temperature_ceiling")]
    pub temperature_ceiling: f64,

    /// H2 数密度阈值 [cm^-3]
    #[serde(default = "default_h2_density_threshold")]
    pub h2_density_threshold: f64,

    /// 冷气体温度阈值 [K]
    #[serde(default = "default_cold_gas_threshold")]
    pub cold_gas_threshold: f64,
}

fn default_dust_to_gas() -> f64 { 0.01 }
fn default_mol_hydrogen_ratio() -> f64 { 2.0 }
fn default_gamma() -> f64 { 5.0 / 3.0 }
fn default_helium_mass_fraction() -> f64 { 0.284 }
fn default_c13_over_c12() -> f64 { 1.0 / 50.0 }
fn default_o18_over_o16() -> f64 { 1.0 / 500.0 }
fn default_molecular_abundance() -> f64 { 1e-4 }
fn default_microturbulence_speed() -> f64 { 1.77264e5 }
fn default_temperature_ceiling() -> f64 { 9e4 }
fn default_h2_density_threshold() -> f64 { 1e2 }
fn default_cold_gas_threshold() -> f64 { 1e2 }

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            dust_to_gas: default_dust_to_gas(),
            mol_hydrogen_ratio: default_mol_hydrogen_ratio(),
            gamma: default_gamma(),
            helium_mass_fraction: default_helium_mass_fraction(),
            c13_over_c12: default_c13_over_c12(),
            o18_over_o16: default_o18_over_o16(),
            molecular_abundance: default_molecular_abundance(),
            microturbulence_speed: default_microturbulence_speed(),
            temperature_ceiling: default_temperature_ceiling(),
            h2_density_threshold: default_h2_density_threshold(),
            cold_gas_threshold: default_cold_gas_threshold(),
        }
    }
}

/// 氦与氢的数密度比 y = Y / (4 (1 - Y))
#[inline]
pub fn helium_number_ratio(helium_mass_fraction: f64) -> f64 {
    helium_mass_fraction / (4.0 * (1.0 - helium_mass_fraction))
}

/// 中性气体平均分子量 μ = (1 + 4y) / (1 + y)
///
/// 分子气体中电子丰度低于 1e-5，分母中忽略电子项。
#[inline]
pub fn mean_molecular_weight(helium_mass_fraction: f64) -> f64 {
    let y = helium_number_ratio(helium_mass_fraction);
    (1.0 + 4.0 * y) / (1.0 + y)
}

/// 内能到温度的换算常数 μ m_H (γ-1) / (1e6 k_B)，MKS
#[inline]
pub fn temperature_constant(mu: f64, gamma: f64) -> f64 {
    mu * MASS_HYDROGEN_MKS * (gamma - 1.0) / (SPECIFIC_ENERGY_SCALE * BOLTZMANN_MKS)
}

impl PhysicsConstants {
    /// 平均分子量
    #[inline]
    pub fn mean_molecular_weight(&self) -> f64 {
        mean_molecular_weight(self.helium_mass_fraction)
    }

    /// 温度换算常数
    #[inline]
    pub fn temperature_constant(&self) -> f64 {
        temperature_constant(self.mean_molecular_weight(), self.gamma)
    }

    /// 验证参数范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dust_to_gas > 0.0) {
            return Err(ConfigError::invalid("physics.dust_to_gas", self.dust_to_gas, "尘气比必须为正"));
        }
        if !(self.mol_hydrogen_ratio > 0.0) {
            return Err(ConfigError::invalid(
                "physics.mol_hydrogen_ratio",
                self.mol_hydrogen_ratio,
                "必须为正",
            ));
        }
        if !(self.gamma > 1.0) {
            return Err(ConfigError::invalid("physics.gamma", self.gamma, "绝热指数必须大于 1"));
        }
        if !(0.0..1.0).contains(&self.helium_mass_fraction) {
            return Err(ConfigError::invalid(
                "physics.helium_mass_fraction",
                self.helium_mass_fraction,
                "氦质量分数必须在 [0, 1) 范围内",
            ));
        }
        for (key, value) in [
            ("physics.c13_over_c12", self.c13_over_c12),
            ("physics.o18_over_o16", self.o18_over_o16),
            ("physics.molecular_abundance", self.molecular_abundance),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::invalid(key, value, "比值必须在 (0, 1] 范围内"));
            }
        }
        if self.microturbulence_speed < 0.0 {
            return Err(ConfigError::invalid(
                "physics.microturbulence_speed",
                self.microturbulence_speed,
                "不能为负",
            ));
        }
        if !(self.temperature_ceiling > 0.0) {
            return Err(ConfigError::invalid(
                "physics.temperature_ceiling",
                self.temperature_ceiling,
                "温度上限必须为正",
            ));
        }
        Ok(())
    }
}
