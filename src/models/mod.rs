//! # 数据模型模块
//!
//! 定义光谱采样点、特征峰、带不确定度的数值和 B 估计值。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`analysis/`、`plot/` 和 `commands/` 使用
//! - 子模块: spectrum, uncertain, estimate

pub mod estimate;
pub mod spectrum;
pub mod uncertain;

pub use estimate::{BandKind, Estimate, Method};
pub use spectrum::{Feature, Sample, Spectrum};
pub use uncertain::UncertainValue;
