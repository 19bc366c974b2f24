// crates/gc_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `GcError` 枚举和 `GcResult` 类型别名。各层（配置、字段、IO）
//! 定义自己的细分错误，并可转换为 `GcError` 在层间传递。
//!
//! # 示例
//!
//! ```
//! use gc_foundation::error::{GcError, GcResult};
//!
//! fn read_config() -> GcResult<()> {
//!     Err(GcError::config("配置文件格式错误"))
//! }
//! assert!(read_config().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type GcResult<T> = Result<T, GcError>;

/// Gizmo Carver 错误类型
#[derive(Error, Debug)]
pub enum GcError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {file} 第{line}行: {message}")]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号（从 1 开始）
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 数据错误
    // ========================================================================
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: String,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    // ========================================================================
    // 字段错误
    // ========================================================================
    /// 字段不存在（既不是原始字段，也未注册为派生字段）
    #[error("字段不存在: ({particle_type}, {name})")]
    FieldNotFound {
        /// 粒子类型（如 PartType0）
        particle_type: String,
        /// 字段名
        name: String,
    },

    /// 派生字段存在循环依赖
    #[error("派生字段循环依赖: {chain}")]
    CyclicField {
        /// 依赖链，形如 `a -> b -> a`
        chain: String,
    },

    // ========================================================================
    // 配置错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 缺少配置项
    #[error("缺少必需的配置项: {key}")]
    MissingConfig {
        /// 配置键名
        key: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    // ========================================================================
    // 其他
    // ========================================================================
    /// 功能不可用（编译时未启用对应 feature）
    #[error("功能不可用: {feature}")]
    NotAvailable {
        /// 功能名称
        feature: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl GcError {
    /// IO 错误
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// IO 错误（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// 字段不存在
    pub fn field_not_found(particle_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::FieldNotFound {
            particle_type: particle_type.into(),
            name: name.into(),
        }
    }

    /// 循环依赖
    pub fn cyclic_field(chain: impl Into<String>) -> Self {
        Self::CyclicField {
            chain: chain.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 缺少配置
    pub fn missing_config(key: impl Into<String>) -> Self {
        Self::MissingConfig { key: key.into() }
    }

    /// 配置值无效
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 序列化错误
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// 功能不可用
    pub fn not_available(feature: impl Into<String>) -> Self {
        Self::NotAvailable {
            feature: feature.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl GcError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &str, expected: usize, actual: usize) -> GcResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }
}

impl From<std::io::Error> for GcError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ensure, require};

    #[test]
    fn test_error_display() {
        let err = GcError::config("测试配置错误");
        assert!(err.to_string().contains("配置错误"));
    }

    #[test]
    fn test_field_not_found_display() {
        let err = GcError::field_not_found("PartType0", "Density");
        let msg = err.to_string();
        assert!(msg.contains("PartType0"));
        assert!(msg.contains("Density"));
    }

    #[test]
    fn test_check_size() {
        assert!(GcError::check_size("Density", 10, 10).is_ok());
        assert!(matches!(
            GcError::check_size("Density", 10, 5),
            Err(GcError::SizeMismatch { expected: 10, actual: 5, .. })
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: GcError = io_err.into();
        assert!(matches!(err, GcError::Io { source: Some(_), .. }));
    }

    #[test]
    fn test_ensure_and_require() {
        fn check(value: i32) -> GcResult<i32> {
            ensure!(value > 0, GcError::invalid_input("value must be positive"));
            let v = require!(Some(value), GcError::missing_config("value"));
            Ok(v)
        }

        assert_eq!(check(3).unwrap(), 3);
        assert!(check(-1).is_err());
    }
}
