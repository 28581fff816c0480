//! # 光谱 CSV 解析器
//!
//! 读取两列数值数据（波长 nm, 信号）。
//!
//! ## 格式说明
//! ```text
//! <前导/表头行 × header_rows_to_skip>
//! 3200.25,-12.53
//! 3200.50,-12.61
//! ...
//! ```
//! 前导行的字段数可以不同；多余的列被忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/spectrum.rs`
//! - 使用 `csv` 读取

use crate::error::{Result, RovibError};
use crate::models::{Sample, Spectrum};

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 解析光谱 CSV 文件
pub fn parse_spectrum_file(path: &Path, header_rows_to_skip: usize) -> Result<Spectrum> {
    if !path.is_file() {
        return Err(RovibError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| RovibError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    let spectrum = parse_spectrum_reader(file, name, header_rows_to_skip)?;
    log::info!(
        "Read {} samples from '{}'",
        spectrum.len(),
        path.display()
    );
    Ok(spectrum)
}

/// 从字符串内容解析
#[cfg(test)]
pub fn parse_spectrum_content(
    content: &str,
    name: &str,
    header_rows_to_skip: usize,
) -> Result<Spectrum> {
    parse_spectrum_reader(content.as_bytes(), name, header_rows_to_skip)
}

/// 从任意输入流解析
pub fn parse_spectrum_reader<R: Read>(
    reader: R,
    name: &str,
    header_rows_to_skip: usize,
) -> Result<Spectrum> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();

    // 按字节读取：前导说明行可能含非 UTF-8 字符（如 Latin-1 的 µ）
    for (row, record) in rdr.byte_records().enumerate() {
        let record = record?;
        if row < header_rows_to_skip {
            continue;
        }

        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(row as u64 + 1);

        if record.len() < 2 {
            return Err(RovibError::MalformedRecord {
                line,
                reason: format!("expected 2 columns, found {}", record.len()),
            });
        }

        let wavelength = parse_field(&record[0], line, "wavelength")?;
        let signal = parse_field(&record[1], line, "signal")?;

        if wavelength <= 0.0 {
            return Err(RovibError::MalformedRecord {
                line,
                reason: format!("wavelength must be positive, got {}", wavelength),
            });
        }

        samples.push(Sample::new(wavelength, signal));
    }

    if samples
        .windows(2)
        .any(|w| w[1].wavelength_nm < w[0].wavelength_nm)
    {
        log::warn!("Spectrum '{}' is not sorted by wavelength", name);
    }

    log::debug!(
        "Parsed '{}': skipped {} header rows, kept {} samples",
        name,
        header_rows_to_skip,
        samples.len()
    );

    Ok(Spectrum::new(name, samples))
}

fn parse_field(field: &[u8], line: u64, column: &str) -> Result<f64> {
    let field = std::str::from_utf8(field).map_err(|_| RovibError::MalformedRecord {
        line,
        reason: format!(
            "{} '{}' is not valid UTF-8",
            column,
            String::from_utf8_lossy(field)
        ),
    })?;

    let value: f64 = field.parse().map_err(|_| RovibError::MalformedRecord {
        line,
        reason: format!("{} '{}' is not a number", column, field),
    })?;

    if !value.is_finite() {
        return Err(RovibError::MalformedRecord {
            line,
            reason: format!("{} '{}' is not finite", column, field),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"Methane (sample A) high res
Wavelength,Voltage
nm,uV
3200.0,-1.5
3200.5,-1.25
3201.0,-2.0
"#;

    #[test]
    fn test_parse_skips_header_rows() {
        let spectrum = parse_spectrum_content(SAMPLE, "methane", 3).unwrap();
        assert_eq!(spectrum.name, "methane");
        assert_eq!(spectrum.len(), 3);
        assert_eq!(spectrum.samples[0].wavelength_nm, 3200.0);
        assert_eq!(spectrum.samples[1].signal, -1.25);
        assert!((spectrum.samples[2].wavenumber_cm_inv - 1e7 / 3201.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_reports_malformed_line() {
        let err = parse_spectrum_content(SAMPLE, "methane", 2).unwrap_err();
        match err {
            RovibError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("nm"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let content = "a\nb\nc\n3300.0, 4.5, extra\n3301.0 ,4.0\n";
        let spectrum = parse_spectrum_content(content, "x", 3).unwrap();
        assert_eq!(spectrum.len(), 2);
        assert_eq!(spectrum.samples[0].signal, 4.5);
        assert_eq!(spectrum.samples[1].wavelength_nm, 3301.0);
    }

    #[test]
    fn test_parse_rejects_missing_column_and_nan() {
        let err = parse_spectrum_content("3300.0\n", "x", 0).unwrap_err();
        assert!(matches!(err, RovibError::MalformedRecord { line: 1, .. }));

        let err = parse_spectrum_content("3300.0,NaN\n", "x", 0).unwrap_err();
        assert!(matches!(err, RovibError::MalformedRecord { .. }));

        let err = parse_spectrum_content("0.0,1.0\n", "x", 0).unwrap_err();
        assert!(matches!(err, RovibError::MalformedRecord { .. }));
    }

    #[test]
    fn test_non_utf8_preamble_is_skipped() {
        let content: &[u8] = b"Methane\nWavelength,Voltage (\xb5V)\nnm,uV\n3300.0,1.0\n3300.5,0.5\n";
        let spectrum = parse_spectrum_reader(content, "x", 3).unwrap();
        assert_eq!(spectrum.len(), 2);
        assert_eq!(spectrum.samples[1].signal, 0.5);
    }

    #[test]
    fn test_non_utf8_data_row_is_malformed() {
        let content: &[u8] = b"3300.0,1.0\n3301.0,\xff\n";
        let err = parse_spectrum_reader(content, "x", 0).unwrap_err();
        match err {
            RovibError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let spectrum = parse_spectrum_content("a\nb\nc\n", "x", 3).unwrap();
        assert!(spectrum.is_empty());
    }
}
