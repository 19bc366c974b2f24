// crates/gc_fields/src/formulas.rs

//! 闭式物理公式
//!
//! 标量版本是纯函数；`*_field` 版本对切片逐元素并行计算。

use gc_foundation::constants::{KMS_TO_CMS, MASS_HYDROGEN_CGS, PARSEC_CM};
use gc_foundation::{GcError, GcResult};
use rayon::prelude::*;

pub use gc_config::physics::{helium_number_ratio, mean_molecular_weight, temperature_constant};

/// 气体温度 [K]
///
/// `T = u·C`；`u ≥ ceiling / C` 的热气体置零，使其不参与谱线发射。
#[inline]
pub fn gas_temperature(internal_energy: f64, constant: f64, ceiling: f64) -> f64 {
    if internal_energy < ceiling / constant {
        internal_energy * constant
    } else {
        0.0
    }
}

/// 尘埃密度 [g/cm³]
#[inline]
pub fn dust_density(density: f64, dust_to_gas: f64) -> f64 {
    dust_to_gas * density
}

/// H2 数密度 [cm^-3]
///
/// `n = ρ f_mol f_HI (1-Y) / (ratio m_H)`
#[inline]
pub fn h2_number_density(
    density: f64,
    molecular_fraction: f64,
    neutral_fraction: f64,
    helium_mass_fraction: f64,
    mol_hydrogen_ratio: f64,
) -> f64 {
    density * molecular_fraction * neutral_fraction * (1.0 - helium_mass_fraction)
        / (mol_hydrogen_ratio * MASS_HYDROGEN_CGS)
}

/// 分子数密度 [cm^-3]
///
/// 只在致密（n_H2 > n_thr）且冷（T < T_thr）的气体中非零。
#[inline]
pub fn molecular_number_density(
    h2_density: f64,
    abundance: f64,
    temperature: f64,
    density_threshold: f64,
    temperature_threshold: f64,
) -> f64 {
    if h2_density > density_threshold && temperature < temperature_threshold {
        h2_density * abundance
    } else {
        0.0
    }
}

/// 线宽-尺度关系 σ = 0.72 (L/1pc)^0.56 km/s，返回 cm/s
#[inline]
pub fn linewidth_size_speed(length_cm: f64) -> f64 {
    0.72 * (length_cm / PARSEC_CM).powf(0.56) * KMS_TO_CMS
}

/// 逐粒子气体温度
pub fn gas_temperature_field(internal_energy: &[f64], constant: f64, ceiling: f64) -> Vec<f64> {
    internal_energy
        .par_iter()
        .map(|&u| gas_temperature(u, constant, ceiling))
        .collect()
}

/// 逐粒子尘埃密度
pub fn dust_density_field(density: &[f64], dust_to_gas: f64) -> Vec<f64> {
    density
        .par_iter()
        .map(|&rho| dust_density(rho, dust_to_gas))
        .collect()
}

/// 逐粒子 H2 数密度
pub fn h2_number_density_field(
    density: &[f64],
    molecular_fraction: &[f64],
    neutral_fraction: &[f64],
    helium_mass_fraction: f64,
    mol_hydrogen_ratio: f64,
) -> Vec<f64> {
    density
        .par_iter()
        .zip(molecular_fraction.par_iter())
        .zip(neutral_fraction.par_iter())
        .map(|((&rho, &f_mol), &f_hi)| {
            h2_number_density(rho, f_mol, f_hi, helium_mass_fraction, mol_hydrogen_ratio)
        })
        .collect()
}

/// 逐粒子分子数密度
///
/// `abundance` 为逐粒子丰度；`mask` 存在时再逐粒子相乘。所有切片长度
/// 必须与 `h2_density` 一致。
pub fn molecular_number_density_field(
    h2_density: &[f64],
    abundance: &[f64],
    temperature: &[f64],
    mask: Option<&[f64]>,
    density_threshold: f64,
    temperature_threshold: f64,
) -> GcResult<Vec<f64>> {
    let n = h2_density.len();
    GcError::check_size("molecular abundance", n, abundance.len())?;
    GcError::check_size("gas_temperature", n, temperature.len())?;

    let values = h2_density
        .par_iter()
        .zip(abundance.par_iter())
        .zip(temperature.par_iter())
        .map(|((&n, &x), &t)| {
            molecular_number_density(n, x, t, density_threshold, temperature_threshold)
        });

    match mask {
        Some(mask) => {
            GcError::check_size("accretion mask", n, mask.len())?;
            Ok(values.zip(mask.par_iter()).map(|(v, &m)| v * m).collect())
        }
        None => Ok(values.collect()),
    }
}
