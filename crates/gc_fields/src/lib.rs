// crates/gc_fields/src/lib.rs

//! Gizmo Carver Physics Layer
//!
//! 从原始粒子属性计算派生物理场，并把粒子场插值到均匀网格。
//!
//! # 模块概览
//!
//! - [`particles`]: 按粒子类型组织的原始/派生字段存储
//! - [`registry`]: 派生字段注册与按依赖求值
//! - [`formulas`]: 闭式物理公式（温度、尘埃密度、H2 与分子数密度）
//! - [`accretion`]: 基于吸积记录的粒子屏蔽
//! - [`derived`]: 标准派生字段集合
//! - [`grid`]: 均匀网格与 SPH 插值
//!
//! # 示例
//!
//! ```
//! use gc_config::CarverConfig;
//! use gc_fields::{names, FieldKey, FieldRegistry, ParticleData, ParticleType};
//!
//! let config = CarverConfig::default();
//! let registry = FieldRegistry::standard(&config, None).unwrap();
//!
//! let mut data = ParticleData::new();
//! data.set_ids(ParticleType::Gas, vec![1, 2]).unwrap();
//! data.insert_field(FieldKey::gas(names::DENSITY), vec![1e-20, 2e-20]).unwrap();
//!
//! let dust = registry.evaluate(&mut data, &FieldKey::gas(names::DUST_DENSITY)).unwrap();
//! assert!((dust[0] - 1e-22).abs() < 1e-30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accretion;
pub mod derived;
pub mod formulas;
pub mod grid;
pub mod names;
pub mod particles;
pub mod registry;

// 重导出核心类型
pub use accretion::{AccretionLog, AccretionRecord};
pub use grid::{deposit, select_overlapping, ParticleCloud, UniformGrid};
pub use particles::{FieldKey, ParticleData, ParticleSet, ParticleType};
pub use registry::{DerivedField, FieldContext, FieldError, FieldMeta, FieldRegistry};
