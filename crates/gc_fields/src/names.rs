// crates/gc_fields/src/names.rs

//! 字段名常量
//!
//! 原始字段沿用 Gizmo HDF5 数据集名，坐标与速度按分量拆开。

// 原始字段
/// 粒子 ID 数据集
pub const PARTICLE_IDS: &str = "ParticleIDs";
/// 质量密度 [g/cm³]
pub const DENSITY: &str = "Density";
/// 比内能（快照代码单位）
pub const INTERNAL_ENERGY: &str = "InternalEnergy";
/// 分子质量分数
pub const MOLECULAR_MASS_FRACTION: &str = "MolecularMassFraction";
/// 中性氢丰度
pub const NEUTRAL_HYDROGEN_ABUNDANCE: &str = "NeutralHydrogenAbundance";
/// 电子丰度
pub const ELECTRON_ABUNDANCE: &str = "ElectronAbundance";
/// 粒子质量 [g]
pub const MASSES: &str = "Masses";
/// 光滑长度 [cm]
pub const SMOOTHING_LENGTH: &str = "SmoothingLength";
/// 位置分量 [cm]
pub const POSITION: [&str; 3] = ["particle_position_x", "particle_position_y", "particle_position_z"];
/// 速度分量 [cm/s]
pub const VELOCITY: [&str; 3] = ["velocity_x", "velocity_y", "velocity_z"];

// 派生字段
/// 气体温度 [K]
pub const GAS_TEMPERATURE: &str = "gas_temperature";
/// 尘埃温度 [K]
pub const DUST_TEMPERATURE: &str = "dust_temperature";
/// 尘埃密度 [g/cm³]
pub const DUST_DENSITY: &str = "DustDensity";
/// H2 数密度 [cm^-3]
pub const H2_NUM_DENSITY: &str = "H2NumDensity";
/// 目标分子数密度 [cm^-3]
pub const MOLECULAR_NUM_DENSITY: &str = "MolecularNumDensity";
/// 屏蔽后的目标分子数密度 [cm^-3]
pub const MASKED_MOLECULAR_NUM_DENSITY: &str = "MaskedMolecularNumDensity";
/// 被吸积粒子标记
pub const ACCRETED_MASK: &str = "AccretedMask";
/// 微湍流速度 [cm/s]
pub const MICROTURBULENCE: &str = "microturbulence_speed";

/// 按分子和化学网络区分的数密度字段名
pub fn species_number_density(label: &str, chemistry: &str) -> String {
    format!("numberdens_{label}_{chemistry}")
}
