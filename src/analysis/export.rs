//! # 特征数据导出
//!
//! 把检测到的特征（可附带分带标签）写入 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `csv` + `serde` 序列化

use crate::analysis::BandSplit;
use crate::error::{Result, RovibError};
use crate::models::{BandKind, Feature};

use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub band: String,
    pub index: usize,
    pub wavelength_nm: f64,
    pub wavenumber_cm_inv: f64,
    pub energy_j: f64,
    pub signal: f64,
    pub prominence: f64,
}

impl FeatureRow {
    pub fn from_feature(feature: &Feature, band: Option<BandKind>) -> Self {
        FeatureRow {
            band: band.map(|b| b.to_string()).unwrap_or_else(|| "-".to_string()),
            index: feature.band_index,
            wavelength_nm: feature.wavelength_nm(),
            wavenumber_cm_inv: feature.wavenumber_cm_inv(),
            energy_j: feature.energy_j(),
            signal: feature.sample.signal,
            prominence: feature.prominence,
        }
    }
}

/// 未分带的特征
pub fn rows_from_features(features: &[Feature]) -> Vec<FeatureRow> {
    features
        .iter()
        .map(|f| FeatureRow::from_feature(f, None))
        .collect()
}

/// 分带后的特征（P 在前，R 在后）
pub fn rows_from_bands(bands: &BandSplit) -> Vec<FeatureRow> {
    [&bands.p, &bands.r]
        .iter()
        .flat_map(|band| {
            band.features
                .iter()
                .map(move |f| FeatureRow::from_feature(f, Some(band.kind)))
        })
        .collect()
}

/// 写入任意输出流
pub fn write_rows<W: Write>(rows: &[FeatureRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| RovibError::Other(e.to_string()))?;
    Ok(())
}

/// 写入 CSV 文件
pub fn to_csv(rows: &[FeatureRow], output_path: &Path) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| RovibError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_rows(rows, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::split_bands;
    use crate::models::Sample;

    fn feature(wl: f64, i: usize) -> Feature {
        Feature {
            sample: Sample::new(wl, -2.5),
            spectrum_index: i,
            prominence: 1.5,
            band_index: i,
        }
    }

    #[test]
    fn test_write_band_rows() {
        let features = vec![feature(3200.0, 0), feature(3300.0, 1), feature(3400.0, 2)];
        let bands = split_bands(&features, 3255.0, 3350.0).unwrap();
        let rows = rows_from_bands(&bands);
        assert_eq!(rows.len(), 2);

        let mut buf = Vec::new();
        write_rows(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "band,index,wavelength_nm,wavenumber_cm_inv,energy_j,signal,prominence"
        );
        assert!(lines[1].starts_with("P,0,3200.0,"));
        assert!(lines[2].starts_with("R,0,3400.0,"));
        assert!(lines[2].ends_with(",-2.5,1.5"));
    }

    #[test]
    fn test_unbanded_rows_use_placeholder() {
        let rows = rows_from_features(&[feature(3200.0, 4)]);
        assert_eq!(rows[0].band, "-");
        assert_eq!(rows[0].index, 4);
    }
}
