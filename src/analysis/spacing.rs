//! # 间距法估计 B
//!
//! 相邻谱线的波数间距约为 2B：对每个带取相邻差的绝对值，
//! 求平均值及其标准误差 (ddof = 1)，B = 平均间距 / 2。
//!
//! ## 依赖关系
//! - 被 `analysis/pipeline.rs` 调用
//! - 使用 `analysis/bands.rs` 的 Band

use crate::analysis::Band;
use crate::error::{Result, RovibError};
use crate::models::{Estimate, Method, UncertainValue};

/// 每带至少需要的特征数（至少两个间距才有标准误差）
pub const MIN_FEATURES: usize = 3;

/// 单带间距统计
#[derive(Debug, Clone)]
pub struct BandSpacing {
    /// 相邻波数差 (cm⁻¹)
    pub differences: Vec<f64>,
    /// 平均间距及其标准误差
    pub mean_spacing: UncertainValue,
    /// B = mean / 2
    pub estimate: Estimate,
}

/// 两带间距法结果
#[derive(Debug, Clone)]
pub struct SpacingAnalysis {
    pub p: BandSpacing,
    pub r: BandSpacing,
    pub combined: Estimate,
}

/// 平均值和均值标准误差
pub fn mean_and_sem(values: &[f64]) -> Result<UncertainValue> {
    let n = values.len();
    if n < 2 {
        return Err(RovibError::insufficient("standard error of the mean", 2, n));
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;

    Ok(UncertainValue::new(mean, variance.sqrt() / (n as f64).sqrt()))
}

/// 单带间距估计
pub fn band_spacing(band: &Band) -> Result<BandSpacing> {
    if band.len() < MIN_FEATURES {
        return Err(RovibError::insufficient(
            format!("spacing estimate of {} band", band.kind),
            MIN_FEATURES,
            band.len(),
        ));
    }

    let differences: Vec<f64> = band
        .wavenumbers()
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .collect();

    let mean_spacing = mean_and_sem(&differences)?;

    Ok(BandSpacing {
        differences,
        mean_spacing,
        estimate: Estimate::new(Method::Spacing, band.kind, mean_spacing / 2.0),
    })
}

/// P、R 两带间距法估计并合并
pub fn spacing_analysis(p: &Band, r: &Band) -> Result<SpacingAnalysis> {
    let p = band_spacing(p)?;
    let r = band_spacing(r)?;
    let combined = Estimate::combine(Method::Spacing, &p.estimate, &r.estimate);

    Ok(SpacingAnalysis { p, r, combined })
}
