// crates/gc_config/src/lib.rs

//! Gizmo Carver Config Layer
//!
//! 配置层：一次切割（carve）运行所需的全部参数。
//!
//! # 模块概览
//!
//! - [`physics`]: 物理常数（尘气比、氦质量分数、同位素比等）
//! - [`region`]: 切割区域几何（中心、半边长、分辨率）
//! - [`snapshot`]: Gizmo 快照路径与单位基
//! - [`species`]: 分子种类、跃迁与静止频率表
//! - [`output_names`]: RADMC-3D 输入文件名表
//! - [`carver_config`]: 顶层配置 `CarverConfig`
//! - [`error`]: 配置错误类型
//!
//! 所有字段都有默认值，JSON 配置文件中只需写出需要改动的部分。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod carver_config;
pub mod error;
pub mod output_names;
pub mod physics;
pub mod region;
pub mod snapshot;
pub mod species;

// 重导出核心类型
pub use carver_config::{
    AbundanceSource, AccretionConfig, CarverConfig, DepositMethod, MicroturbulenceModel,
    PathsConfig, SpeciesOutput, WavelengthConfig,
};
pub use error::ConfigError;
pub use output_names::OutputNames;
pub use physics::PhysicsConstants;
pub use region::RegionConfig;
pub use snapshot::{SnapshotConfig, UnitBase};
pub use species::{Chemistry, Species, Transition};
