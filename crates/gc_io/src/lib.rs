// crates/gc_io/src/lib.rs

//! Gizmo Carver IO 模块
//!
//! # 模块
//!
//! - [`snapshot`]: 快照读取（HDF5、JSON 粒子转储）
//! - [`accretion_log`]: 吸积记录读取
//! - [`radmc`]: RADMC-3D 输入文件写出
//! - [`staging`]: 复制运行所需的外部文件
//! - [`input_info`]: 运行参数记录
//!
//! # 可选依赖
//!
//! - `hdf5`: 启用 HDF5 快照读取

pub mod accretion_log;
pub mod error;
pub mod input_info;
pub mod radmc;
pub mod snapshot;
pub mod staging;

// 重导出常用类型
pub use accretion_log::{parse_accretion_log, read_accretion_log};
pub use error::{IoError, IoResult};
pub use input_info::write_input_info;
pub use snapshot::{read_snapshot, Hdf5SnapshotReader, JsonSnapshotReader, SnapshotReader};
pub use staging::{stage_existing_files, StageReport};
