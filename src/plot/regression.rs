//! # 能量-序号拟合图
//!
//! 画出 P、R 两带的 (L, E) 散点与最小二乘拟合直线。
//! 能量以 10⁻²⁰ J 为单位显示。
//!
//! ## 依赖关系
//! - 被 `commands/analyze.rs` 调用
//! - 使用 `analysis/gradient.rs` 的 GradientAnalysis

use crate::analysis::gradient::BandGradient;
use crate::analysis::GradientAnalysis;
use crate::error::Result;
use crate::models::BandKind;
use crate::plot::{padded, plot_err, PlotStyle, P_BAND_COLOR, R_BAND_COLOR};

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

const ENERGY_SCALE: f64 = 1e20;

type EnergyCoord = Cartesian2d<RangedCoordf64, RangedCoordf64>;

/// 生成能量-序号拟合图
pub fn generate_regression_plot(
    gradient: &GradientAnalysis,
    output_path: &Path,
    title: &str,
    style: &PlotStyle,
) -> Result<()> {
    if style.use_svg {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_regression_chart(&root, gradient, title)?;
        root.present().map_err(plot_err)?;
    } else {
        let root =
            BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_regression_chart(&root, gradient, title)?;
        root.present().map_err(plot_err)?;
    }

    log::debug!("Regression plot written to '{}'", output_path.display());
    Ok(())
}

fn draw_regression_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    gradient: &GradientAnalysis,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let bands = [&gradient.p, &gradient.r];

    let x_last = bands
        .iter()
        .flat_map(|b| b.points.iter().map(|(l, _)| *l))
        .fold(1.0, f64::max);
    let y_range = bands
        .iter()
        .flat_map(|b| b.points.iter().map(|(_, e)| e * ENERGY_SCALE))
        .fold(None, |acc: Option<(f64, f64)>, e| match acc {
            None => Some((e, e)),
            Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
        })
        .unwrap_or((0.0, 1.0));
    let (y_min, y_max) = padded(y_range, 0.05);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(x_last + 0.5), y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Quantum number index L")
        .y_desc("Photon energy (10⁻²⁰ J)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    for band in bands {
        draw_band(&mut chart, band)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

fn draw_band<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, EnergyCoord>,
    band: &BandGradient,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let color = match band.kind {
        BandKind::P => P_BAND_COLOR,
        _ => R_BAND_COLOR,
    };

    chart
        .draw_series(
            band.points
                .iter()
                .map(|&(l, e)| Circle::new((l, e * ENERGY_SCALE), 5, color.filled())),
        )
        .map_err(plot_err)?
        .label(format!("{} band", band.kind))
        .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));

    let l_end = band.points.last().map(|(l, _)| *l).unwrap_or(0.0);
    chart
        .draw_series(LineSeries::new(
            [0.0, l_end]
                .into_iter()
                .map(|l| (l, band.fit.predict(l) * ENERGY_SCALE)),
            color.stroke_width(2),
        ))
        .map_err(plot_err)?
        .label(format!("{} fit: B = {:.4} cm⁻¹", band.kind, band.estimate.b))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

    Ok(())
}
