//! # analyze 命令实现
//!
//! 读取单个光谱文件，按模式执行：
//! - `basic`: 打印概要并绘制原始光谱
//! - `peaks` / `dips`: 检测特征、列表、可选导出与绘图
//! - `full`: 分带、两种方法估计 B、推导转动惯量与键长
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/`, `analysis/`, `plot/`
//! - 使用 `utils/output.rs`

use crate::analysis::export::{self, FeatureRow};
use crate::analysis::{self, detect_features, AnalysisConfig, FullAnalysis, SpacingAnalysis};
use crate::cli::analyze::{AnalyzeArgs, Mode, PlotFormat, XAxis};
use crate::error::{Result, RovibError};
use crate::models::{Estimate, Spectrum};
use crate::parsers;
use crate::plot::{self, spectrum as spectrum_plot, PlotStyle};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 特征表格行
#[derive(Debug, Clone, Tabled)]
struct FeatureTableRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "L")]
    index: usize,
    #[tabled(rename = "λ (nm)")]
    wavelength: String,
    #[tabled(rename = "ν (cm⁻¹)")]
    wavenumber: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Prominence")]
    prominence: String,
}

impl From<&FeatureRow> for FeatureTableRow {
    fn from(row: &FeatureRow) -> Self {
        FeatureTableRow {
            band: row.band.clone(),
            index: row.index,
            wavelength: format!("{:.3}", row.wavelength_nm),
            wavenumber: format!("{:.3}", row.wavenumber_cm_inv),
            signal: format!("{:.4}", row.signal),
            prominence: format!("{:.4}", row.prominence),
        }
    }
}

/// 估计值表格行
#[derive(Debug, Clone, Tabled)]
struct EstimateRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "B (cm⁻¹)")]
    b: String,
}

impl From<&Estimate> for EstimateRow {
    fn from(e: &Estimate) -> Self {
        EstimateRow {
            method: e.method.to_string(),
            band: e.band.to_string(),
            b: format!("{:.4}", e.b),
        }
    }
}

/// 间距统计表格行
#[derive(Debug, Clone, Tabled)]
struct SpacingRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Spacings")]
    count: usize,
    #[tabled(rename = "Δν range (cm⁻¹)")]
    range: String,
    #[tabled(rename = "Mean Δν (cm⁻¹)")]
    mean: String,
}

fn spacing_rows(spacing: &SpacingAnalysis) -> Vec<SpacingRow> {
    [&spacing.p, &spacing.r]
        .into_iter()
        .map(|s| {
            let lo = s.differences.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = s.differences.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            SpacingRow {
                band: s.estimate.band.to_string(),
                count: s.differences.len(),
                range: format!("{:.3} - {:.3}", lo, hi),
                mean: format!("{:.4}", s.mean_spacing),
            }
        })
        .collect()
}

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    output::print_header(&format!("Spectrum Analysis ({} mode)", args.mode));

    let config = args.to_config();
    if args.mode != Mode::Basic {
        config.validate()?;
    }
    log::debug!("Analysis config: {:?}", config);

    let spectrum = parsers::parse_spectrum_file(&args.input, config.header_rows_to_skip)?;
    output::print_success(&format!(
        "Loaded '{}' ({} samples, {} header rows skipped)",
        spectrum.name,
        spectrum.len(),
        config.header_rows_to_skip
    ));

    if !args.no_plot {
        fs::create_dir_all(&args.plot_dir).map_err(|e| RovibError::FileWriteError {
            path: args.plot_dir.display().to_string(),
            source: e,
        })?;
    }

    match args.mode {
        Mode::Basic => run_basic(&spectrum, &args),
        Mode::Peaks | Mode::Dips => run_detection(&spectrum, &config, &args),
        Mode::Full => run_full(&spectrum, &config, &args),
    }
}

/// basic 模式：概要 + 原始光谱图
fn run_basic(spectrum: &Spectrum, args: &AnalyzeArgs) -> Result<()> {
    print_summary(spectrum);

    if !args.no_plot {
        let path = plot_path(args, &spectrum.name, "spectrum");
        spectrum_plot::generate_spectrum_plot(
            spectrum,
            &[],
            &path,
            &spectrum.name,
            args.x_axis == XAxis::Wavenumber,
            &plot_style(args),
        )?;
        output::print_success(&format!("Spectrum plot saved to '{}'", path.display()));
    }

    Ok(())
}

/// peaks / dips 模式
fn run_detection(spectrum: &Spectrum, config: &AnalysisConfig, args: &AnalyzeArgs) -> Result<()> {
    print_summary(spectrum);

    let features = detect_features(spectrum, config.prominence, config.feature_kind)?;

    if features.is_empty() {
        output::print_warning(&format!(
            "No {} found with prominence ≥ {}",
            config.feature_kind, config.prominence
        ));
    } else {
        output::print_success(&format!(
            "Found {} {} (prominence ≥ {})",
            features.len(),
            config.feature_kind,
            config.prominence
        ));
        let rows = export::rows_from_features(&features);
        print_feature_table(&rows);
        export_rows(&rows, args.export.as_deref())?;
    }

    if !args.no_plot {
        let path = plot_path(args, &spectrum.name, &config.feature_kind.to_string());
        spectrum_plot::generate_spectrum_plot(
            spectrum,
            &spectrum_plot::markers_from_features(&features),
            &path,
            &format!("{} ({})", spectrum.name, config.feature_kind),
            args.x_axis == XAxis::Wavenumber,
            &plot_style(args),
        )?;
        output::print_success(&format!("Feature plot saved to '{}'", path.display()));
    }

    Ok(())
}

/// full 模式
fn run_full(spectrum: &Spectrum, config: &AnalysisConfig, args: &AnalyzeArgs) -> Result<()> {
    output::print_info(&format!(
        "Detecting {} (prominence ≥ {}), P band ≤ {} nm, R band ≥ {} nm",
        config.feature_kind, config.prominence, config.p_max_nm, config.r_min_nm
    ));

    let result = analysis::run_full(spectrum, config)?;

    output::print_success(&format!(
        "{} features: {} in P band, {} in R band, {} dropped between bands",
        result.features.len(),
        result.bands.p.len(),
        result.bands.r.len(),
        result.bands.dropped
    ));

    let rows = export::rows_from_bands(&result.bands);
    print_feature_table(&rows);
    export_rows(&rows, args.export.as_deref())?;

    print_estimates(&result);
    print_constants(&result);

    if !args.no_plot {
        plot_full(spectrum, &result, args)?;
    }

    Ok(())
}

fn print_summary(spectrum: &Spectrum) {
    if let Some((lo, hi)) = spectrum.wavelength_range() {
        output::print_info(&format!("Wavelength range: {:.2} - {:.2} nm", lo, hi));
    }
    if let Some((lo, hi)) = spectrum.wavenumber_range() {
        output::print_info(&format!("Wavenumber range: {:.2} - {:.2} cm⁻¹", lo, hi));
    }
    if let Some((lo, hi)) = spectrum.signal_range() {
        output::print_info(&format!("Signal range: {:.4} - {:.4}", lo, hi));
    }
}

fn print_feature_table(rows: &[FeatureRow]) {
    let table_rows: Vec<FeatureTableRow> = rows.iter().map(FeatureTableRow::from).collect();
    println!("{}", Table::new(&table_rows));
}

fn print_estimates(result: &FullAnalysis) {
    output::print_header("Line Spacing");
    println!("{}", Table::new(spacing_rows(&result.spacing)));

    output::print_header("Rotational Constant Estimates");

    let estimates: Vec<EstimateRow> = [
        &result.spacing.p.estimate,
        &result.spacing.r.estimate,
        &result.spacing.combined,
        &result.gradient.p.estimate,
        &result.gradient.r.estimate,
        &result.gradient.combined,
        &result.constants.b_cm,
    ]
    .into_iter()
    .map(EstimateRow::from)
    .collect();

    println!("{}", Table::new(&estimates));

    for band in [&result.gradient.p, &result.gradient.r] {
        log::info!(
            "{} band fit: slope = {:e} ± {:e} J, intercept = {:e} ± {:e} J, r = {:.6}",
            band.kind,
            band.fit.slope,
            band.fit.slope_stderr,
            band.fit.intercept,
            band.fit.intercept_stderr,
            band.fit.r_value
        );
    }
}

fn print_constants(result: &FullAnalysis) {
    let c = &result.constants;

    output::print_header("Derived Molecular Constants");
    output::print_value("B (cm⁻¹)", &format!("{:.4}", c.b_cm.b));
    output::print_value("B (m⁻¹)", &format!("{:.2}", c.b_m));
    output::print_value(
        "B relative uncertainty",
        &format!("{:.3} %", c.b_cm.b.relative_error() * 100.0),
    );
    output::print_value("I (kg m²)", &format!("{:#.4}", c.moment_of_inertia));
    output::print_value(
        "r, CH₄ symmetry (m)",
        &format!(
            "{:#.4}  ({:.4} Å)",
            c.bond_length_methane,
            c.bond_length_methane * 1e10
        ),
    );
    output::print_value(
        "r, diatomic C–O (m)",
        &format!(
            "{:#.4}  ({:.4} Å)",
            c.bond_length_diatomic,
            c.bond_length_diatomic * 1e10
        ),
    );
    println!();
}

fn plot_full(spectrum: &Spectrum, result: &FullAnalysis, args: &AnalyzeArgs) -> Result<()> {
    let style = plot_style(args);

    let spectrum_path = plot_path(args, &spectrum.name, "bands");
    spectrum_plot::generate_spectrum_plot(
        spectrum,
        &spectrum_plot::markers_from_bands(&result.features, &result.bands),
        &spectrum_path,
        &spectrum.name,
        args.x_axis == XAxis::Wavenumber,
        &style,
    )?;
    output::print_success(&format!(
        "Spectrum plot saved to '{}'",
        spectrum_path.display()
    ));

    let regression_path = plot_path(args, &spectrum.name, "regression");
    plot::regression::generate_regression_plot(
        &result.gradient,
        &regression_path,
        &format!("{}: energy vs. L", spectrum.name),
        &style,
    )?;
    output::print_success(&format!(
        "Regression plot saved to '{}'",
        regression_path.display()
    ));

    Ok(())
}

fn export_rows(rows: &[FeatureRow], path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        export::to_csv(rows, path)?;
        output::print_success(&format!(
            "{} features exported to '{}'",
            rows.len(),
            path.display()
        ));
    }
    Ok(())
}

fn plot_style(args: &AnalyzeArgs) -> PlotStyle {
    PlotStyle {
        width: args.width,
        height: args.height,
        use_svg: args.format == PlotFormat::Svg,
    }
}

fn plot_path(args: &AnalyzeArgs, name: &str, suffix: &str) -> PathBuf {
    let ext = plot_style(args).extension();
    args.plot_dir.join(format!("{}_{}.{}", name, suffix, ext))
}
