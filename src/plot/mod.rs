//! # 图表生成模块
//!
//! 使用 `plotters` 生成光谱图和能量-序号拟合图，支持 PNG 与 SVG。
//!
//! ## 子模块
//! - `spectrum`: 信号-波长/波数曲线，标注检测到的特征
//! - `regression`: 能量-序号散点与拟合直线
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 和 `commands/plot.rs` 调用
//! - 使用 `models/` 与 `analysis/` 的结果结构

pub mod regression;
pub mod spectrum;

use crate::error::RovibError;
use plotters::style::RGBColor;

/// 图像尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

impl PlotStyle {
    /// 输出文件扩展名
    pub fn extension(&self) -> &'static str {
        if self.use_svg {
            "svg"
        } else {
            "png"
        }
    }
}

pub(crate) const LINE_COLOR: RGBColor = RGBColor(0, 102, 204);
pub(crate) const P_BAND_COLOR: RGBColor = RGBColor(214, 39, 40);
pub(crate) const R_BAND_COLOR: RGBColor = RGBColor(44, 160, 44);
pub(crate) const UNBANDED_COLOR: RGBColor = RGBColor(255, 127, 14);

pub(crate) fn plot_err<E: std::fmt::Debug>(e: E) -> RovibError {
    RovibError::PlotError(format!("{:?}", e))
}

/// 在 (min, max) 两侧各留出一定比例的空白；退化区间按 ±1 展开
pub(crate) fn padded(range: (f64, f64), fraction: f64) -> (f64, f64) {
    let (lo, hi) = range;
    let span = hi - lo;
    if span.abs() < f64::EPSILON * lo.abs().max(1.0) {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo - span * fraction, hi + span * fraction)
    }
}
