//! # 光谱分析模块
//!
//! 从光谱中提取转动常数 B 的核心算法。
//!
//! ## 流程
//! 1. `features`: 按显著度检测峰/谷
//! 2. `bands`: 按波长阈值划分 P 带和 R 带
//! 3. `spacing`: 相邻谱线波数间距 → B
//! 4. `gradient`: 能量-序号线性拟合斜率 → B
//! 5. `combiner`: 合并两种估计，推导转动惯量和键长
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `models/` 数据模型
//! - 子模块: constants, config, features, bands, spacing, gradient, combiner, pipeline, export

pub mod bands;
pub mod combiner;
pub mod config;
pub mod constants;
pub mod export;
pub mod features;
pub mod gradient;
pub mod pipeline;
pub mod spacing;

pub use bands::{split_bands, Band, BandSplit};
pub use combiner::{derive_constants, MolecularConstants};
pub use config::AnalysisConfig;
pub use features::{detect_features, FeatureKind};
pub use gradient::{gradient_analysis, GradientAnalysis};
pub use pipeline::{run_full, FullAnalysis};
pub use spacing::{spacing_analysis, SpacingAnalysis};
