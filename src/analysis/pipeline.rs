//! # 完整分析流程
//!
//! 检测 → 分带 → 间距法 / 梯度法 → 合并推导，纯函数，不修改输入。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 在 `full` 模式下调用

use crate::analysis::{
    derive_constants, detect_features, gradient_analysis, spacing_analysis, split_bands,
    AnalysisConfig, BandSplit, GradientAnalysis, MolecularConstants, SpacingAnalysis,
};
use crate::error::Result;
use crate::models::{Feature, Spectrum};

/// 完整分析结果
#[derive(Debug, Clone)]
pub struct FullAnalysis {
    pub features: Vec<Feature>,
    pub bands: BandSplit,
    pub spacing: SpacingAnalysis,
    pub gradient: GradientAnalysis,
    pub constants: MolecularConstants,
}

/// 对光谱运行完整分析
pub fn run_full(spectrum: &Spectrum, config: &AnalysisConfig) -> Result<FullAnalysis> {
    config.validate()?;

    let features = detect_features(spectrum, config.prominence, config.feature_kind)?;
    log::info!(
        "Detected {} {} in '{}'",
        features.len(),
        config.feature_kind,
        spectrum.name
    );

    let bands = split_bands(&features, config.p_max_nm, config.r_min_nm)?;
    let spacing = spacing_analysis(&bands.p, &bands.r)?;
    let gradient = gradient_analysis(&bands.p, &bands.r)?;
    let constants = derive_constants(&spacing.combined, &gradient.combined)?;

    Ok(FullAnalysis {
        features,
        bands,
        spacing,
        gradient,
        constants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FeatureKind;
    use crate::error::RovibError;

    /// 在给定波数处放置深度为 4 的吸收谷，谷之间为平坦基线
    fn absorption_spectrum(dip_wavenumbers: &[f64]) -> Spectrum {
        let mut dips: Vec<f64> = dip_wavenumbers.iter().map(|nu| 1e7 / nu).collect();
        dips.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut pairs = vec![(3100.0, 10.0)];
        for wl in dips {
            pairs.push((wl - 0.5, 10.0));
            pairs.push((wl, 6.0));
            pairs.push((wl + 0.5, 10.0));
        }
        pairs.push((3500.0, 10.0));
        Spectrum::from_pairs("synthetic", &pairs)
    }

    #[test]
    fn test_end_to_end_recovers_five_wavenumbers() {
        let mut lines: Vec<f64> = (0..5).map(|i| 3150.0 - 10.0 * i as f64).collect();
        lines.extend((0..5).map(|i| 2960.0 - 10.0 * i as f64));
        // 死区中的谱线不参与计算
        lines.push(1e7 / 3300.0);
        let spectrum = absorption_spectrum(&lines);

        let result = run_full(&spectrum, &AnalysisConfig::default()).unwrap();

        assert_eq!(result.features.len(), 11);
        assert_eq!(result.bands.p.len(), 5);
        assert_eq!(result.bands.r.len(), 5);
        assert_eq!(result.bands.dropped, 1);

        assert!((result.spacing.combined.b.value - 5.0).abs() < 1e-6);
        assert!(result.spacing.combined.b.stderr < 1e-6);
        assert!((result.gradient.combined.b.value - 5.0).abs() < 1e-6);
        assert!(result.gradient.combined.b.stderr < 1e-6);

        let c = &result.constants;
        assert!((c.b_m.value - 500.0).abs() < 1e-4);
        assert!(c.moment_of_inertia.is_finite());
        assert!(c.moment_of_inertia.value > 0.0);
        assert!(c.bond_length_methane.is_finite());
        assert!(c.bond_length_diatomic.is_finite());
    }

    #[test]
    fn test_two_lines_per_band_is_insufficient() {
        let spectrum = absorption_spectrum(&[3150.0, 3140.0, 2960.0, 2950.0]);
        let config = AnalysisConfig {
            feature_kind: FeatureKind::Dip,
            ..Default::default()
        };

        match run_full(&spectrum, &config) {
            Err(RovibError::InsufficientData { needed, found, .. }) => {
                assert_eq!(needed, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected insufficient data, got {:?}", other.map(|r| r.features.len())),
        }
    }
}
