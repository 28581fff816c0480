//! # plot 子命令 CLI 定义
//!
//! 批量绘制目录中的所有光谱文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use crate::analysis::config::DEFAULT_HEADER_ROWS;
use crate::cli::analyze::{PlotFormat, XAxis};

use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Input: spectrum CSV file or directory containing CSV files
    pub input: PathBuf,

    /// Output directory for the plots
    #[arg(short, long, default_value = "plots")]
    pub output: PathBuf,

    /// Glob pattern for input files (comma separated)
    #[arg(long, default_value = "*.csv")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Horizontal axis
    #[arg(long, value_enum, default_value = "wavenumber")]
    pub x_axis: XAxis,

    /// Plot image format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: PlotFormat,

    /// Number of leading header/preamble rows to discard
    #[arg(long, env = "ROVIB_HEADER_ROWS", default_value_t = DEFAULT_HEADER_ROWS)]
    pub header_rows: usize,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
