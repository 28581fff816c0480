//! # analyze 子命令 CLI 定义
//!
//! 各分析模式合并为一个参数化流程：
//! - `basic`: 只绘制原始光谱
//! - `peaks` / `dips`: 检测发射峰 / 吸收谷并列表
//! - `full`: 完整的 B 估计与分子常数推导
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze.rs`

use crate::analysis::config::{
    DEFAULT_HEADER_ROWS, DEFAULT_PROMINENCE, DEFAULT_P_MAX_NM, DEFAULT_R_MIN_NM,
};
use crate::analysis::{AnalysisConfig, FeatureKind};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共用选项
// ─────────────────────────────────────────────────────────────

/// 分析模式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Mode {
    /// Plot the raw spectrum only
    Basic,
    /// Detect emission peaks
    Peaks,
    /// Detect absorption dips
    Dips,
    /// Full rotational constant estimation
    #[default]
    Full,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Basic => write!(f, "basic"),
            Mode::Peaks => write!(f, "peaks"),
            Mode::Dips => write!(f, "dips"),
            Mode::Full => write!(f, "full"),
        }
    }
}

/// full 模式下检测的特征类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FeatureArg {
    /// Emission peaks
    Peak,
    /// Absorption dips
    Dip,
}

impl From<FeatureArg> for FeatureKind {
    fn from(arg: FeatureArg) -> Self {
        match arg {
            FeatureArg::Peak => FeatureKind::Peak,
            FeatureArg::Dip => FeatureKind::Dip,
        }
    }
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

/// 光谱图横轴
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum XAxis {
    /// Wavelength in nm
    Wavelength,
    /// Wavenumber in cm⁻¹
    Wavenumber,
}

// ─────────────────────────────────────────────────────────────
// Analyze 主命令
// ─────────────────────────────────────────────────────────────

/// analyze 子命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input CSV file (wavelength nm, signal)
    pub input: PathBuf,

    /// Analysis mode
    #[arg(short, long, value_enum, default_value = "full")]
    pub mode: Mode,

    /// Minimum prominence of a detected peak or dip (signal units)
    #[arg(short, long, env = "ROVIB_PROMINENCE", default_value_t = DEFAULT_PROMINENCE)]
    pub prominence: f64,

    /// Features at or below this wavelength (nm) form the P band
    #[arg(long, env = "ROVIB_P_MAX", default_value_t = DEFAULT_P_MAX_NM)]
    pub p_max: f64,

    /// Features at or above this wavelength (nm) form the R band
    #[arg(long, env = "ROVIB_R_MIN", default_value_t = DEFAULT_R_MIN_NM)]
    pub r_min: f64,

    /// Number of leading header/preamble rows to discard
    #[arg(long, env = "ROVIB_HEADER_ROWS", default_value_t = DEFAULT_HEADER_ROWS)]
    pub header_rows: usize,

    /// Feature type used by the full analysis
    #[arg(long, value_enum, default_value = "dip")]
    pub feature: FeatureArg,

    /// Directory for generated plots
    #[arg(long, default_value = ".")]
    pub plot_dir: PathBuf,

    /// Plot image format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: PlotFormat,

    /// Horizontal axis of the spectrum plot
    #[arg(long, value_enum, default_value = "wavelength")]
    pub x_axis: XAxis,

    /// Write detected features to this CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}

impl AnalyzeArgs {
    /// 转换为分析参数；peaks/dips 模式决定特征类型
    pub fn to_config(&self) -> AnalysisConfig {
        let feature_kind = match self.mode {
            Mode::Peaks => FeatureKind::Peak,
            Mode::Dips => FeatureKind::Dip,
            Mode::Basic | Mode::Full => self.feature.into(),
        };

        AnalysisConfig {
            prominence: self.prominence,
            p_max_nm: self.p_max,
            r_min_nm: self.r_min,
            header_rows_to_skip: self.header_rows,
            feature_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> AnalyzeArgs {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Analyze(a) => a,
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_defaults_match_config() {
        let args = parse(&["rovib", "analyze", "data.csv"]);
        assert_eq!(args.mode, Mode::Full);
        assert_eq!(args.to_config(), AnalysisConfig::default());
    }

    #[test]
    fn test_mode_selects_feature_kind() {
        let args = parse(&["rovib", "analyze", "data.csv", "--mode", "peaks", "-p", "0.25"]);
        let config = args.to_config();
        assert_eq!(config.feature_kind, FeatureKind::Peak);
        assert_eq!(config.prominence, 0.25);

        let args = parse(&[
            "rovib", "analyze", "data.csv", "--feature", "peak", "--p-max", "3200", "--r-min",
            "3400",
        ]);
        let config = args.to_config();
        assert_eq!(config.feature_kind, FeatureKind::Peak);
        assert_eq!(config.p_max_nm, 3200.0);
        assert_eq!(config.r_min_nm, 3400.0);
    }
}
