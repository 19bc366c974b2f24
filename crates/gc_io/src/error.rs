// crates/gc_io/src/error.rs
//! IO 错误类型定义
//!
//! 所有错误最终可转换为 GcError 以实现跨层错误传递。

use gc_foundation::GcError;
use std::path::Path;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound { path: String },

    /// 无法识别文件格式
    #[error("无法识别文件格式: {path}")]
    UnknownFormat { path: String },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// 快照中缺少数据集
    #[error("快照缺少数据集: {file} {dataset}")]
    MissingDataset { file: String, dataset: String },

    /// 读写失败
    #[error("读写失败: {path}: {source}")]
    Access {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HDF5 错误
    #[error("HDF5 错误: {0}")]
    Hdf5(String),

    /// 可选功能未编译
    #[error("功能不可用: {feature}（需启用 feature `{feature}`）")]
    NotAvailable { feature: &'static str },

    /// JSON 错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] GcError),
}

impl IoError {
    /// 带路径的读写错误
    pub fn access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        Self::Access { path, source }
    }

    /// 解析错误
    pub fn parse(file: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.as_ref().display().to_string(),
            line,
            message: message.into(),
        }
    }
}

impl From<IoError> for GcError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => GcError::file_not_found(path),
            IoError::UnknownFormat { path } => {
                GcError::invalid_input(format!("无法识别文件格式: {path}"))
            }
            IoError::ParseError { file, line, message } => GcError::parse(file, line, message),
            IoError::MissingDataset { file, dataset } => {
                GcError::invalid_input(format!("快照缺少数据集 [{file}]: {dataset}"))
            }
            IoError::Access { path, source } => {
                GcError::io_with_source(format!("读写失败: {path}"), source)
            }
            IoError::Hdf5(message) => GcError::io(format!("HDF5: {message}")),
            IoError::NotAvailable { feature } => GcError::not_available(feature),
            IoError::Json(e) => GcError::serialization(e.to_string()),
            IoError::Foundation(gc_err) => gc_err,
        }
    }
}

#[cfg(feature = "hdf5")]
impl From<hdf5::Error> for IoError {
    fn from(e: hdf5::Error) -> Self {
        IoError::Hdf5(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = IoError::access(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IoError::FileNotFound { .. }));
        let gc: GcError = err.into();
        assert!(matches!(gc, GcError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_error_conversion() {
        let gc: GcError = IoError::parse("sinkprops.txt", 7, "列数不足").into();
        match gc {
            GcError::ParseError { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
