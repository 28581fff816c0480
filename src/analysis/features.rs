//! # 峰/谷检测
//!
//! 在信号序列中寻找局部极大值，并按显著度 (prominence) 过滤。
//! 谷检测通过对信号取反转化为峰检测。
//!
//! ## 算法
//! 1. 局部极大值：严格高于左邻点，且高于右侧第一个不等的点；
//!    等高平台取平台的第一个点
//! 2. 显著度：分别向左、向右走到第一个严格更高的点（或序列边界），
//!    取两侧区间最小值中较大者作为基线，显著度 = 峰高 − 基线
//! 3. 保留显著度 ≥ 阈值的极值，按原始顺序返回
//!
//! ## 依赖关系
//! - 被 `analysis/pipeline.rs` 和 `commands/analyze.rs` 调用
//! - 使用 `models/spectrum.rs` 的 Spectrum, Feature

use crate::error::{Result, RovibError};
use crate::models::{Feature, Spectrum};

/// 特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// 发射峰
    Peak,
    /// 吸收谷
    Dip,
}

impl FeatureKind {
    fn orient(&self, signal: f64) -> f64 {
        match self {
            FeatureKind::Peak => signal,
            FeatureKind::Dip => -signal,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Peak => write!(f, "peaks"),
            FeatureKind::Dip => write!(f, "dips"),
        }
    }
}

/// 检测光谱特征
pub fn detect_features(
    spectrum: &Spectrum,
    prominence: f64,
    kind: FeatureKind,
) -> Result<Vec<Feature>> {
    if !prominence.is_finite() || prominence <= 0.0 {
        return Err(RovibError::InvalidInput(format!(
            "prominence must be a positive number, got {}",
            prominence
        )));
    }

    if spectrum.len() < 3 {
        log::debug!(
            "Spectrum '{}' has {} samples, no extrema possible",
            spectrum.name,
            spectrum.len()
        );
        return Ok(Vec::new());
    }

    let signal: Vec<f64> = spectrum
        .signals()
        .into_iter()
        .map(|s| kind.orient(s))
        .collect();

    let maxima = local_maxima(&signal);
    let proms = prominences(&signal, &maxima);

    let features: Vec<Feature> = maxima
        .iter()
        .zip(proms)
        .filter(|(_, p)| *p >= prominence)
        .enumerate()
        .map(|(order, (&idx, p))| Feature {
            sample: spectrum.samples[idx],
            spectrum_index: idx,
            prominence: p,
            band_index: order,
        })
        .collect();

    log::debug!(
        "Spectrum '{}': {} local maxima, {} {} above prominence {}",
        spectrum.name,
        maxima.len(),
        features.len(),
        kind,
        prominence
    );

    Ok(features)
}

/// 局部极大值的位置（平台取第一个点）
pub fn local_maxima(x: &[f64]) -> Vec<usize> {
    let n = x.len();
    let mut maxima = Vec::new();
    let mut i = 1;

    while i + 1 < n {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < n && x[ahead] == x[i] {
                ahead += 1;
            }
            if ahead < n && x[ahead] < x[i] {
                maxima.push(i);
            }
            i = ahead;
        } else {
            i += 1;
        }
    }

    maxima
}

/// 计算每个极大值的显著度
pub fn prominences(x: &[f64], maxima: &[usize]) -> Vec<f64> {
    maxima
        .iter()
        .map(|&peak| {
            let height = x[peak];

            let left_min = x[..peak]
                .iter()
                .rev()
                .take_while(|&&v| v <= height)
                .fold(height, |acc, &v| acc.min(v));

            let right_min = x[peak + 1..]
                .iter()
                .take_while(|&&v| v <= height)
                .fold(height, |acc, &v| acc.min(v));

            height - left_min.max(right_min)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 基线为 0，在 10/30/50 处注入高度 5 的三角峰，在 20/40 处注入 0.1 的噪声尖刺
    fn synthetic_signal() -> Vec<f64> {
        let mut y = vec![0.0; 61];
        for &c in &[10usize, 30, 50] {
            y[c - 2] = 1.0;
            y[c - 1] = 3.0;
            y[c] = 5.0;
            y[c + 1] = 3.0;
            y[c + 2] = 1.0;
        }
        y[20] = 0.1;
        y[40] = 0.1;
        y
    }

    fn spectrum_from_signal(signal: &[f64]) -> Spectrum {
        let pairs: Vec<(f64, f64)> = signal
            .iter()
            .enumerate()
            .map(|(i, &s)| (3200.0 + i as f64, s))
            .collect();
        Spectrum::from_pairs("synthetic", &pairs)
    }

    #[test]
    fn test_detects_exactly_injected_peaks() {
        let spectrum = spectrum_from_signal(&synthetic_signal());
        let features = detect_features(&spectrum, 1.0, FeatureKind::Peak).unwrap();

        let idx: Vec<usize> = features.iter().map(|f| f.spectrum_index).collect();
        assert_eq!(idx, vec![10, 30, 50]);
        for f in &features {
            assert!((f.prominence - 5.0).abs() < 1e-12);
        }

        // 阈值低于噪声时噪声尖刺也会被报告
        let all = detect_features(&spectrum, 0.05, FeatureKind::Peak).unwrap();
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_detects_dips_on_inverted_signal() {
        let inverted: Vec<f64> = synthetic_signal().iter().map(|v| 10.0 - v).collect();
        let spectrum = spectrum_from_signal(&inverted);

        let dips = detect_features(&spectrum, 1.0, FeatureKind::Dip).unwrap();
        let idx: Vec<usize> = dips.iter().map(|f| f.spectrum_index).collect();
        assert_eq!(idx, vec![10, 30, 50]);
        assert!((dips[0].sample.signal - 5.0).abs() < 1e-12);
        assert!((dips[1].prominence - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_plateau_reports_first_point() {
        assert_eq!(local_maxima(&[0.0, 1.0, 1.0, 1.0, 0.0]), vec![1]);
        // 平台后继续上升不是极值
        assert_eq!(local_maxima(&[0.0, 1.0, 1.0, 2.0, 0.0]), vec![3]);
        // 序列末尾的平台不是极值
        assert!(local_maxima(&[0.0, 1.0, 1.0]).is_empty());
    }

    #[test]
    fn test_prominence_uses_higher_baseline() {
        // 峰 (idx 3) 左侧最低 0，右侧在遇到更高点 (idx 6) 前最低 2
        let x = [0.0, 1.0, 2.0, 5.0, 2.0, 3.0, 8.0, 0.0];
        let maxima = local_maxima(&x);
        assert_eq!(maxima, vec![3, 6]);

        let p = prominences(&x, &maxima);
        assert!((p[0] - 3.0).abs() < 1e-12);
        assert!((p[1] - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_spectrum_is_empty() {
        let spectrum = Spectrum::from_pairs("short", &[(3200.0, 0.0), (3201.0, 5.0)]);
        assert!(detect_features(&spectrum, 1.0, FeatureKind::Peak)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rejects_non_positive_prominence() {
        let spectrum = spectrum_from_signal(&synthetic_signal());
        assert!(matches!(
            detect_features(&spectrum, 0.0, FeatureKind::Peak),
            Err(RovibError::InvalidInput(_))
        ));
        assert!(detect_features(&spectrum, -1.0, FeatureKind::Dip).is_err());
    }
}
