// crates/gc_foundation/src/lib.rs

//! Gizmo Carver Foundation Layer
//!
//! 基础层，提供整个项目共用的错误类型、物理常数和长度单位。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `GcError`
//! - [`constants`]: CGS / MKS 物理常数
//! - [`units`]: 区域几何使用的长度单位
//!
//! # 示例
//!
//! ```
//! use gc_foundation::{units::LengthUnit, error::{GcError, GcResult}};
//!
//! fn box_size_cm(size: f64, unit: LengthUnit) -> GcResult<f64> {
//!     gc_foundation::ensure!(size > 0.0, GcError::invalid_input("box size must be positive"));
//!     Ok(size * unit.to_cm())
//! }
//!
//! assert!(box_size_cm(1.0, LengthUnit::Cm).is_ok());
//! assert!(box_size_cm(-1.0, LengthUnit::Pc).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod units;

// 重导出常用类型
pub use error::{GcError, GcResult};
pub use units::LengthUnit;

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

/// 解包 `Option`，为 `None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr $(,)?) => {
        match $opt {
            Some(v) => v,
            None => return Err($err.into()),
        }
    };
}

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::constants::*;
    pub use crate::error::{GcError, GcResult};
    pub use crate::units::LengthUnit;
    pub use crate::{ensure, require};
}
