//! # 解析器模块
//!
//! 读取光谱测量数据。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: spectrum_csv

pub mod spectrum_csv;

pub use spectrum_csv::parse_spectrum_file;
