//! # 梯度法估计 B
//!
//! 对每个带做光子能量 E 对带内序号 L 的最小二乘直线拟合，
//! 斜率 dE/dL = ±2hcB，换算为 B (cm⁻¹):
//!
//! ```text
//! B = | slope · 1e-2 / (s · 2hc) |,  s = +1 (R), −1 (P)
//! ```
//!
//! ## 依赖关系
//! - 被 `analysis/pipeline.rs` 调用
//! - 拟合结果被 `plot/regression.rs` 用于绘制趋势线

use crate::analysis::constants::{PLANCK, SPEED_OF_LIGHT};
use crate::analysis::Band;
use crate::error::{Result, RovibError};
use crate::models::{BandKind, Estimate, Method, UncertainValue};

/// 线性回归最少点数
pub const MIN_POINTS: usize = 2;

/// 最小二乘直线拟合结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub slope_stderr: f64,
    pub intercept_stderr: f64,
    /// 相关系数 r
    pub r_value: f64,
    pub n: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// 单带拟合与估计
#[derive(Debug, Clone)]
pub struct BandGradient {
    pub kind: BandKind,
    /// (L, E) 数据点
    pub points: Vec<(f64, f64)>,
    pub fit: LinearFit,
    pub estimate: Estimate,
}

/// 两带梯度法结果
#[derive(Debug, Clone)]
pub struct GradientAnalysis {
    pub p: BandGradient,
    pub r: BandGradient,
    pub combined: Estimate,
}

/// 普通最小二乘线性回归
///
/// 两点时为精确拟合，标准误差记为 0。
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(RovibError::InvalidInput(format!(
            "regression needs paired data, got {} x and {} y values",
            x.len(),
            y.len()
        )));
    }

    let n = x.len();
    if n < MIN_POINTS {
        return Err(RovibError::insufficient("linear regression", MIN_POINTS, n));
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let sxx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    let syy: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let sxy: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    if sxx == 0.0 {
        return Err(RovibError::InvalidInput(
            "regression x values have zero variance".to_string(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let r_value = if syy == 0.0 {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };

    let (slope_stderr, intercept_stderr) = if n == MIN_POINTS {
        (0.0, 0.0)
    } else {
        let sse: f64 = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (yi - (intercept + slope * xi)).powi(2))
            .sum();
        let residual_variance = sse / (nf - 2.0);
        let slope_se = (residual_variance / sxx).sqrt();
        let intercept_se = (residual_variance * (1.0 / nf + x_mean * x_mean / sxx)).sqrt();
        (slope_se, intercept_se)
    };

    Ok(LinearFit {
        slope,
        intercept,
        slope_stderr,
        intercept_stderr,
        r_value,
        n,
    })
}

/// 斜率 (J / 序号) 换算为 B (cm⁻¹)
pub fn b_from_slope(slope: UncertainValue, kind: BandKind) -> UncertainValue {
    let factor = 1e-2 / (kind.gradient_sign() * 2.0 * PLANCK * SPEED_OF_LIGHT);
    let b = slope * factor;
    UncertainValue::new(b.value.abs(), b.stderr)
}

/// 单带梯度估计
pub fn band_gradient(band: &Band) -> Result<BandGradient> {
    if band.len() < MIN_POINTS {
        return Err(RovibError::insufficient(
            format!("gradient estimate of {} band", band.kind),
            MIN_POINTS,
            band.len(),
        ));
    }

    let x = band.indices();
    let y = band.energies();
    let fit = linear_regression(&x, &y)?;

    log::debug!(
        "{} band fit: slope = {:e} ± {:e} J, r = {:.6}",
        band.kind,
        fit.slope,
        fit.slope_stderr,
        fit.r_value
    );

    let b = b_from_slope(UncertainValue::new(fit.slope, fit.slope_stderr), band.kind);

    Ok(BandGradient {
        kind: band.kind,
        points: x.into_iter().zip(y).collect(),
        fit,
        estimate: Estimate::new(Method::Gradient, band.kind, b),
    })
}

/// P、R 两带梯度法估计并合并
pub fn gradient_analysis(p: &Band, r: &Band) -> Result<GradientAnalysis> {
    let p = band_gradient(p)?;
    let r = band_gradient(r)?;
    let combined = Estimate::combine(Method::Gradient, &p.estimate, &r.estimate);

    Ok(GradientAnalysis { p, r, combined })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Feature, Sample};

    #[test]
    fn test_regression_recovers_exact_line() {
        let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|xi| 3.0 * xi + 1.0).collect();

        let fit = linear_regression(&x, &y).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!(fit.slope_stderr < 1e-12);
        assert!(fit.intercept_stderr < 1e-12);
        assert!((fit.r_value - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 31.0).abs() < 1e-12);
    }

    #[test]
    fn test_regression_standard_error() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 0.0, 3.0, 2.0];
        let fit = linear_regression(&x, &y).unwrap();

        // sxx = 5, sxy = 3 → slope 0.6, intercept 0.6
        assert!((fit.slope - 0.6).abs() < 1e-12);
        assert!((fit.intercept - 0.6).abs() < 1e-12);

        // 残差 0.4, -1.2, 1.2, -0.4 → sse = 3.2, s² = 1.6
        let expected = (1.6f64 / 5.0).sqrt();
        assert!((fit.slope_stderr - expected).abs() < 1e-12);
    }

    #[test]
    fn test_regression_two_points_is_exact() {
        let fit = linear_regression(&[0.0, 1.0], &[2.0, 5.0]).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert_eq!(fit.slope_stderr, 0.0);
    }

    #[test]
    fn test_regression_rejects_bad_input() {
        assert!(matches!(
            linear_regression(&[1.0], &[1.0]),
            Err(RovibError::InsufficientData { .. })
        ));
        assert!(linear_regression(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_err());
        assert!(linear_regression(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_b_from_slope_is_positive_for_both_bands() {
        let hc = PLANCK * SPEED_OF_LIGHT;
        // B = 5 cm⁻¹ = 500 m⁻¹, dE/dL = 2hcB
        let slope = 2.0 * hc * 500.0;

        let r = b_from_slope(UncertainValue::new(slope, slope * 0.01), BandKind::R);
        assert!((r.value - 5.0).abs() < 1e-9);
        assert!((r.stderr - 0.05).abs() < 1e-9);

        let p = b_from_slope(UncertainValue::exact(-slope), BandKind::P);
        assert!((p.value - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_analysis_on_linear_bands() {
        let band = |kind: BandKind, start: f64, step: f64| {
            let features = (0..5)
                .map(|i| Feature {
                    sample: Sample::new(1e7 / (start + step * i as f64), 0.0),
                    spectrum_index: i,
                    prominence: 1.0,
                    band_index: i,
                })
                .collect();
            Band::new(kind, features)
        };

        let p = band(BandKind::P, 3150.0, -10.0);
        let r = band(BandKind::R, 2960.0, -10.0);

        let analysis = gradient_analysis(&p, &r).unwrap();
        assert!((analysis.p.estimate.b.value - 5.0).abs() < 1e-6);
        assert!((analysis.r.estimate.b.value - 5.0).abs() < 1e-6);
        assert!((analysis.combined.b.value - 5.0).abs() < 1e-6);
        assert!(analysis.combined.b.stderr < 1e-6);
        assert_eq!(analysis.p.points.len(), 5);
    }
}
