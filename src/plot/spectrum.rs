//! # 光谱图
//!
//! 绘制信号对波长（或波数）的曲线，可选地用圆点标出检测到的特征，
//! P 带 / R 带 / 未分带特征使用不同颜色。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs`, `commands/plot.rs` 调用
//! - 使用 `plotters` 渲染图表

use crate::analysis::BandSplit;
use crate::error::{Result, RovibError};
use crate::models::{BandKind, Feature, Sample, Spectrum};
use crate::plot::{
    padded, plot_err, PlotStyle, LINE_COLOR, P_BAND_COLOR, R_BAND_COLOR, UNBANDED_COLOR,
};

use plotters::prelude::*;
use std::path::Path;

/// 图上标注的特征
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub feature: Feature,
    pub band: Option<BandKind>,
}

/// 未分带的特征标注
pub fn markers_from_features(features: &[Feature]) -> Vec<Marker> {
    features
        .iter()
        .map(|&feature| Marker {
            feature,
            band: None,
        })
        .collect()
}

/// 按分带结果着色的特征标注，死区特征保持未分带
pub fn markers_from_bands(features: &[Feature], bands: &BandSplit) -> Vec<Marker> {
    let band_of = |f: &Feature| {
        if bands
            .p
            .features
            .iter()
            .any(|p| p.spectrum_index == f.spectrum_index)
        {
            Some(BandKind::P)
        } else if bands
            .r
            .features
            .iter()
            .any(|r| r.spectrum_index == f.spectrum_index)
        {
            Some(BandKind::R)
        } else {
            None
        }
    };

    features
        .iter()
        .map(|&feature| Marker {
            feature,
            band: band_of(&feature),
        })
        .collect()
}

/// 生成光谱图
pub fn generate_spectrum_plot(
    spectrum: &Spectrum,
    markers: &[Marker],
    output_path: &Path,
    title: &str,
    use_wavenumber: bool,
    style: &PlotStyle,
) -> Result<()> {
    if spectrum.is_empty() {
        return Err(RovibError::insufficient(
            format!("plotting '{}'", spectrum.name),
            1,
            0,
        ));
    }

    if style.use_svg {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, markers, title, use_wavenumber)?;
        root.present().map_err(plot_err)?;
    } else {
        let root =
            BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_spectrum_chart(&root, spectrum, markers, title, use_wavenumber)?;
        root.present().map_err(plot_err)?;
    }

    log::debug!("Spectrum plot written to '{}'", output_path.display());
    Ok(())
}

/// 绘制光谱图的核心逻辑
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &Spectrum,
    markers: &[Marker],
    title: &str,
    use_wavenumber: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let x_of = move |s: &Sample| {
        if use_wavenumber {
            s.wavenumber_cm_inv
        } else {
            s.wavelength_nm
        }
    };

    let x_range = if use_wavenumber {
        spectrum.wavenumber_range()
    } else {
        spectrum.wavelength_range()
    };
    let (x_min, x_max) = padded(x_range.unwrap_or((0.0, 1.0)), 0.01);
    let (y_min, y_max) = padded(spectrum.signal_range().unwrap_or((0.0, 1.0)), 0.05);

    let x_desc = if use_wavenumber {
        "Wavenumber (cm⁻¹)"
    } else {
        "Wavelength (nm)"
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Voltage (μV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            spectrum.samples.iter().map(|s| (x_of(s), s.signal)),
            LINE_COLOR.stroke_width(1),
        ))
        .map_err(plot_err)?;

    let groups = [
        (Some(BandKind::P), P_BAND_COLOR, "P band"),
        (Some(BandKind::R), R_BAND_COLOR, "R band"),
        (None, UNBANDED_COLOR, "Features"),
    ];

    let mut labelled = false;
    for (band, color, label) in groups {
        let points: Vec<(f64, f64)> = markers
            .iter()
            .filter(|m| m.band == band)
            .map(|m| (x_of(&m.feature.sample), m.feature.sample.signal))
            .collect();

        if points.is_empty() {
            continue;
        }

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )
            .map_err(plot_err)?
            .label(format!("{} ({})", label, points.len()))
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        labelled = true;
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::split_bands;

    fn feature(wl: f64, i: usize) -> Feature {
        Feature {
            sample: Sample::new(wl, 0.0),
            spectrum_index: i,
            prominence: 1.0,
            band_index: i,
        }
    }

    #[test]
    fn test_markers_follow_band_membership() {
        let features = vec![feature(3200.0, 1), feature(3300.0, 5), feature(3400.0, 9)];
        let bands = split_bands(&features, 3255.0, 3350.0).unwrap();

        let markers = markers_from_bands(&features, &bands);
        let tags: Vec<Option<BandKind>> = markers.iter().map(|m| m.band).collect();
        assert_eq!(tags, vec![Some(BandKind::P), None, Some(BandKind::R)]);

        assert!(markers_from_features(&features)
            .iter()
            .all(|m| m.band.is_none()));
    }
}
