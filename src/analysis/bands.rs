//! # P/R 分带
//!
//! 按波长阈值把特征划分为 P 带 (λ ≤ p_max) 和 R 带 (λ ≥ r_min)，
//! 两阈值之间的死区特征被丢弃。每个带内重新从 0 编号，作为量子数 L。
//!
//! ## 依赖关系
//! - 被 `analysis/pipeline.rs` 调用
//! - 结果供 `analysis/spacing.rs`, `analysis/gradient.rs` 和 `plot/` 使用

use crate::analysis::config::validate_band_thresholds;
use crate::error::Result;
use crate::models::{BandKind, Feature};

/// 单个分带
#[derive(Debug, Clone)]
pub struct Band {
    pub kind: BandKind,
    pub features: Vec<Feature>,
}

impl Band {
    pub fn new(kind: BandKind, features: Vec<Feature>) -> Self {
        let features = features
            .into_iter()
            .enumerate()
            .map(|(i, f)| f.with_band_index(i))
            .collect();
        Band { kind, features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// 波数序列 (cm⁻¹)
    pub fn wavenumbers(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.wavenumber_cm_inv()).collect()
    }

    /// 光子能量序列 (J)
    pub fn energies(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.energy_j()).collect()
    }

    /// 带内序号 L
    pub fn indices(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.band_index as f64).collect()
    }
}

/// 分带结果
#[derive(Debug, Clone)]
pub struct BandSplit {
    pub p: Band,
    pub r: Band,
    /// 落在死区被丢弃的特征数
    pub dropped: usize,
}

/// 划分 P/R 带
pub fn split_bands(features: &[Feature], p_max: f64, r_min: f64) -> Result<BandSplit> {
    validate_band_thresholds(p_max, r_min)?;

    let mut p = Vec::new();
    let mut r = Vec::new();
    let mut dropped = 0;

    for feature in features {
        let wl = feature.wavelength_nm();
        if wl <= p_max {
            p.push(*feature);
        } else if wl >= r_min {
            r.push(*feature);
        } else {
            dropped += 1;
        }
    }

    log::debug!(
        "Band split (p_max = {} nm, r_min = {} nm): P = {}, R = {}, dropped = {}",
        p_max,
        r_min,
        p.len(),
        r.len(),
        dropped
    );

    let split = BandSplit {
        p: Band::new(BandKind::P, p),
        r: Band::new(BandKind::R, r),
        dropped,
    };

    for band in [&split.p, &split.r] {
        if band.is_empty() {
            log::warn!("No features fall in the {} band", band.kind);
        }
    }

    Ok(split)
}
