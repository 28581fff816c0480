//! # 统一错误处理模块
//!
//! 定义 rovib 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// rovib 统一错误类型
#[derive(Error, Debug)]
pub enum RovibError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Insufficient data for {what}: need at least {needed}, found {found}")]
    InsufficientData {
        what: String,
        needed: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plotting failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

impl RovibError {
    /// 构造数据不足错误
    pub fn insufficient(what: impl Into<String>, needed: usize, found: usize) -> Self {
        RovibError::InsufficientData {
            what: what.into(),
            needed,
            found,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RovibError>;
