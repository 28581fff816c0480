//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `analyze`: 单个光谱分析（basic / peaks / dips / full 模式）
//! - `plot`: 批量绘制目录中的光谱
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: analyze, plot

pub mod analyze;
pub mod plot;

use clap::{Parser, Subcommand};

/// rovib - 振转光谱转动常数分析工具
#[derive(Parser)]
#[command(name = "rovib")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Estimate the rotational constant B from ro-vibrational spectra",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single spectrum (raw plot, peak/dip detection or full B estimation)
    Analyze(analyze::AnalyzeArgs),

    /// Plot every spectrum CSV in a directory
    Plot(plot::PlotArgs),
}
