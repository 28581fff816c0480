//! # 转动常数估计值
//!
//! 为 B 的估计值附加方法与分带标签。
//!
//! ## 依赖关系
//! - 被 `analysis/spacing.rs`, `analysis/gradient.rs`, `analysis/combiner.rs` 构造
//! - 被 `commands/analyze.rs` 用于输出表格

use crate::models::UncertainValue;

/// 估计方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 相邻谱线间距
    Spacing,
    /// 能量-序号线性拟合斜率
    Gradient,
    /// 两种方法的平均
    Combined,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Spacing => write!(f, "spacing"),
            Method::Gradient => write!(f, "gradient"),
            Method::Combined => write!(f, "combined"),
        }
    }
}

/// 分带
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    P,
    R,
    Combined,
}

impl BandKind {
    /// 梯度法换算时使用的符号：P 带能量随序号递减
    pub fn gradient_sign(&self) -> f64 {
        match self {
            BandKind::P => -1.0,
            BandKind::R | BandKind::Combined => 1.0,
        }
    }
}

impl std::fmt::Display for BandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandKind::P => write!(f, "P"),
            BandKind::R => write!(f, "R"),
            BandKind::Combined => write!(f, "combined"),
        }
    }
}

/// B 的估计值 (cm⁻¹)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub method: Method,
    pub band: BandKind,
    pub b: UncertainValue,
}

impl Estimate {
    pub fn new(method: Method, band: BandKind, b: UncertainValue) -> Self {
        Estimate { method, band, b }
    }

    /// 合并 P、R 两带（或两种方法）的估计
    pub fn combine(method: Method, first: &Estimate, second: &Estimate) -> Self {
        Estimate::new(
            method,
            BandKind::Combined,
            UncertainValue::combine(first.b, second.b),
        )
    }
}
