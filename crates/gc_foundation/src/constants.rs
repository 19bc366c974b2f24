// crates/gc_foundation/src/constants.rs

//! 物理常数
//!
//! 派生字段公式使用的常数。CGS 为主，温度公式需要的 MKS 版本单独给出。
//! 氢原子质量取与 yt 一致的数值（1.007947 amu）。

// ============================================================================
// 基本常数
// ============================================================================

/// 氢原子质量 [g]
pub const MASS_HYDROGEN_CGS: f64 = 1.673_735_223_805_186_8e-24;

/// 氢原子质量 [kg]
pub const MASS_HYDROGEN_MKS: f64 = MASS_HYDROGEN_CGS * 1e-3;

/// Boltzmann 常数 [erg/K]
pub const BOLTZMANN_CGS: f64 = 1.380_649e-16;

/// Boltzmann 常数 [J/K]
pub const BOLTZMANN_MKS: f64 = 1.380_649e-23;

/// 光速 [cm/s]
pub const SPEED_OF_LIGHT_CGS: f64 = 2.997_924_58e10;

// ============================================================================
// 长度与速度换算
// ============================================================================

/// 秒差距 [cm]
pub const PARSEC_CM: f64 = 3.085_677_581_491_367_3e18;

/// 天文单位 [cm]
pub const AU_CM: f64 = 1.495_978_707e13;

/// 光年 [cm]
pub const LIGHT_YEAR_CM: f64 = 9.460_730_472_580_8e17;

/// 微米 [cm]
pub const MICRON_CM: f64 = 1e-4;

/// km/s -> cm/s
pub const KMS_TO_CMS: f64 = 1e5;

/// 内能换算因子
///
/// 温度常数 `μ m_H (γ-1) / (1e6 k_B)` 中的 1e6。
pub const SPECIFIC_ENERGY_SCALE: f64 = 1e6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mks_cgs_consistency() {
        assert!((MASS_HYDROGEN_MKS / MASS_HYDROGEN_CGS - 1e-3).abs() < 1e-18);
        assert!((BOLTZMANN_MKS / BOLTZMANN_CGS - 1e-7).abs() < 1e-20);
    }

    #[test]
    fn test_parsec_in_au() {
        // 1 pc ≈ 206264.8 AU
        let ratio = PARSEC_CM / AU_CM;
        assert!((ratio - 206_264.806).abs() < 1e-2);
    }
}
