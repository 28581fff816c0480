//! # plot 命令实现
//!
//! 批量读取目录中的光谱 CSV，为每个文件生成一张光谱图。
//!
//! ## 功能
//! - 按 glob 模式收集文件，可递归
//! - rayon 并行绘图，已存在的输出默认跳过
//! - 单个文件失败不影响其余文件
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`, `plot/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::analyze::{PlotFormat, XAxis};
use crate::cli::plot::PlotArgs;
use crate::error::{Result, RovibError};
use crate::parsers;
use crate::plot::{spectrum as spectrum_plot, PlotStyle};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

const MAX_LISTED_FAILURES: usize = 10;

/// 单个文件绘图所需的全部设置
struct BatchPlotConfig {
    output_dir: PathBuf,
    header_rows: usize,
    use_wavenumber: bool,
    overwrite: bool,
    style: PlotStyle,
}

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Batch Spectrum Plotting");

    if !args.input.exists() {
        return Err(if args.input.extension().is_some() {
            RovibError::FileNotFound {
                path: args.input.display().to_string(),
            }
        } else {
            RovibError::DirectoryNotFound {
                path: args.input.display().to_string(),
            }
        });
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        return Err(RovibError::NoFilesFound {
            pattern: format!("{} under {}", args.pattern, args.input.display()),
        });
    }

    output::print_info(&format!("Found {} spectrum file(s)", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| RovibError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchPlotConfig {
        output_dir: args.output.clone(),
        header_rows: args.header_rows,
        use_wavenumber: args.x_axis == XAxis::Wavenumber,
        overwrite: args.overwrite,
        style: PlotStyle {
            width: args.width,
            height: args.height,
            use_svg: args.format == PlotFormat::Svg,
        },
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel job(s)", runner.jobs()));

    let result = runner.run(files, |file| process_file(file, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Plotted {} of {} file(s) into '{}' ({} skipped, {} failed)",
        result.success,
        result.total(),
        args.output.display(),
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  {} - {}", path, err);
        }
        if result.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more",
                result.failures.len() - MAX_LISTED_FAILURES
            );
        }
    }

    Ok(())
}

fn process_file(input: &Path, config: &BatchPlotConfig) -> ProcessResult {
    let output_path = output_path_for(input, config);

    if output_path.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "{} (output exists)",
            output_path.display()
        ));
    }

    match plot_one(input, &output_path, config) {
        Ok(()) => ProcessResult::Success(format!(
            "{} -> {}",
            input.display(),
            output_path.display()
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn plot_one(input: &Path, output_path: &Path, config: &BatchPlotConfig) -> Result<()> {
    let spectrum = parsers::parse_spectrum_file(input, config.header_rows)?;
    spectrum_plot::generate_spectrum_plot(
        &spectrum,
        &[],
        output_path,
        &spectrum.name,
        config.use_wavenumber,
        &config.style,
    )
}

/// `<output>/<stem>.<ext>`
fn output_path_for(input: &Path, config: &BatchPlotConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("spectrum");
    config
        .output_dir
        .join(format!("{}.{}", stem, config.style.extension()))
}
