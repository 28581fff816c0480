//! # 光谱数据模型
//!
//! 存储波长-信号采样点及其派生量（波数、光子能量）。
//!
//! ## 依赖关系
//! - 被 `parsers/spectrum_csv.rs` 构造
//! - 被 `analysis/` 和 `plot/` 使用
//! - 使用 `analysis/constants.rs` 的物理常数

use crate::analysis::constants::{NM_TO_CM, NM_TO_M, PLANCK, SPEED_OF_LIGHT};

/// 单个采样点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 波长 (nm)
    pub wavelength_nm: f64,
    /// 信号强度（任意电压单位）
    pub signal: f64,
    /// 波数 (cm⁻¹)
    pub wavenumber_cm_inv: f64,
    /// 光子能量 (J)
    pub energy_j: f64,
}

impl Sample {
    /// 由波长和信号创建采样点，同时计算派生量
    pub fn new(wavelength_nm: f64, signal: f64) -> Self {
        Sample {
            wavelength_nm,
            signal,
            wavenumber_cm_inv: 1.0 / (wavelength_nm * NM_TO_CM),
            energy_j: PLANCK * SPEED_OF_LIGHT / (wavelength_nm * NM_TO_M),
        }
    }
}

/// 光谱：按数据源顺序排列的采样点序列
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// 光谱名称（通常为文件名）
    pub name: String,
    /// 采样点
    pub samples: Vec<Sample>,
}

impl Spectrum {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Spectrum {
            name: name.into(),
            samples,
        }
    }

    /// 由 (波长, 信号) 对构造
    #[cfg(test)]
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        Spectrum::new(
            name,
            pairs.iter().map(|&(wl, s)| Sample::new(wl, s)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 信号序列
    pub fn signals(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.signal).collect()
    }

    /// 波长范围 (min, max)
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        range_of(self.samples.iter().map(|s| s.wavelength_nm))
    }

    /// 波数范围 (min, max)
    pub fn wavenumber_range(&self) -> Option<(f64, f64)> {
        range_of(self.samples.iter().map(|s| s.wavenumber_cm_inv))
    }

    /// 信号范围 (min, max)
    pub fn signal_range(&self) -> Option<(f64, f64)> {
        range_of(self.samples.iter().map(|s| s.signal))
    }
}

fn range_of(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// 检测到的光谱特征（峰或谷）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    /// 对应的采样点
    pub sample: Sample,
    /// 在原始光谱中的位置
    pub spectrum_index: usize,
    /// 显著度（按检测方向计算，恒为正）
    pub prominence: f64,
    /// 带内序号 L（由分带器重新编号，分带前等于检测顺序）
    pub band_index: usize,
}

impl Feature {
    pub fn wavelength_nm(&self) -> f64 {
        self.sample.wavelength_nm
    }

    pub fn wavenumber_cm_inv(&self) -> f64 {
        self.sample.wavenumber_cm_inv
    }

    pub fn energy_j(&self) -> f64 {
        self.sample.energy_j
    }

    /// 以新的带内序号复制
    pub fn with_band_index(self, band_index: usize) -> Self {
        Feature { band_index, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_derived_fields() {
        let s = Sample::new(3300.0, 1.5);

        // 1 / (3300e-7 cm) = 3030.303 cm⁻¹
        assert!((s.wavenumber_cm_inv - 3030.303_030_3).abs() < 1e-6);

        let expected_energy = PLANCK * SPEED_OF_LIGHT / 3300e-9;
        assert!((s.energy_j - expected_energy).abs() < 1e-30);

        // E = h c ν (ν 以 m⁻¹ 计)
        let from_wavenumber = PLANCK * SPEED_OF_LIGHT * s.wavenumber_cm_inv * 100.0;
        assert!((s.energy_j - from_wavenumber).abs() / s.energy_j < 1e-12);
    }

    #[test]
    fn test_spectrum_ranges() {
        let spectrum = Spectrum::from_pairs("t", &[(3200.0, 2.0), (3100.0, -1.0), (3400.0, 5.0)]);
        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.wavelength_range(), Some((3100.0, 3400.0)));
        assert_eq!(spectrum.signal_range(), Some((-1.0, 5.0)));

        let (lo, hi) = spectrum.wavenumber_range().unwrap();
        assert!(lo < hi);
        assert!((hi - 1e7 / 3100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_spectrum_has_no_range() {
        let spectrum = Spectrum::new("empty", vec![]);
        assert!(spectrum.is_empty());
        assert_eq!(spectrum.wavelength_range(), None);
    }
}
