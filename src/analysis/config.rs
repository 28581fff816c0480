//! # 分析参数
//!
//! 汇总阈值常数，提供默认值并统一校验。

use crate::analysis::FeatureKind;
use crate::error::{Result, RovibError};

/// 默认显著度阈值（信号单位）
pub const DEFAULT_PROMINENCE: f64 = 1.0;
/// P 带上限波长 (nm)
pub const DEFAULT_P_MAX_NM: f64 = 3255.0;
/// R 带下限波长 (nm)
pub const DEFAULT_R_MIN_NM: f64 = 3350.0;
/// CSV 开头需丢弃的行数
pub const DEFAULT_HEADER_ROWS: usize = 3;

/// 分析参数
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// 最小显著度
    pub prominence: f64,
    /// 波长 ≤ p_max_nm 的特征归入 P 带
    pub p_max_nm: f64,
    /// 波长 ≥ r_min_nm 的特征归入 R 带
    pub r_min_nm: f64,
    /// 丢弃的表头/前导行数
    pub header_rows_to_skip: usize,
    /// 检测峰还是谷
    pub feature_kind: FeatureKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            prominence: DEFAULT_PROMINENCE,
            p_max_nm: DEFAULT_P_MAX_NM,
            r_min_nm: DEFAULT_R_MIN_NM,
            header_rows_to_skip: DEFAULT_HEADER_ROWS,
            feature_kind: FeatureKind::Dip,
        }
    }
}

impl AnalysisConfig {
    /// 校验阈值
    pub fn validate(&self) -> Result<()> {
        if !self.prominence.is_finite() || self.prominence <= 0.0 {
            return Err(RovibError::InvalidInput(format!(
                "prominence must be a positive number, got {}",
                self.prominence
            )));
        }
        validate_band_thresholds(self.p_max_nm, self.r_min_nm)
    }
}

/// 检查 P/R 分带阈值: 有限且 p_max < r_min
pub fn validate_band_thresholds(p_max: f64, r_min: f64) -> Result<()> {
    if !p_max.is_finite() || !r_min.is_finite() {
        return Err(RovibError::InvalidInput(format!(
            "band thresholds must be finite, got p_max = {}, r_min = {}",
            p_max, r_min
        )));
    }
    if p_max >= r_min {
        return Err(RovibError::InvalidInput(format!(
            "p_max ({} nm) must be below r_min ({} nm)",
            p_max, r_min
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.header_rows_to_skip, 3);
        assert_eq!(config.feature_kind, FeatureKind::Dip);
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let config = AnalysisConfig {
            prominence: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RovibError::InvalidInput(_))));

        let config = AnalysisConfig {
            p_max_nm: 3400.0,
            r_min_nm: 3350.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RovibError::InvalidInput(_))));

        assert!(validate_band_thresholds(f64::NAN, 3350.0).is_err());
    }
}
