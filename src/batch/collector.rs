//! # 文件收集器
//!
//! 根据输入路径和文件名模式收集待处理的光谱文件。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob::Pattern` 匹配文件名

use crate::error::{Result, RovibError};

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,
    patterns: Vec<Pattern>,
    recursive: bool,
}

impl FileCollector {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式，大小写不敏感）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    RovibError::InvalidInput(format!("invalid file pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    fn matches(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if self.patterns.is_empty() {
            return true;
        }

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        self.patterns
            .iter()
            .any(|p| p.matches_with(filename, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("data"))
            .with_pattern("*.csv, methane*")
            .unwrap();

        assert!(collector.matches(Path::new("data/Methane (sample A) high res.CSV")));
        assert!(collector.matches(Path::new("data/co.csv")));
        assert!(collector.matches(Path::new("data/methane_notes.txt")));
        assert!(!collector.matches(Path::new("data/readme.md")));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let collector = FileCollector::new(PathBuf::from("data"))
            .with_pattern(" , ")
            .unwrap();
        assert!(collector.matches(Path::new("anything.dat")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = FileCollector::new(PathBuf::from("data")).with_pattern("[*.csv");
        assert!(matches!(result, Err(RovibError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_input_collects_nothing() {
        let collector = FileCollector::new(PathBuf::from("/nonexistent/rovib/input"));
        assert!(collector.collect().is_empty());
    }
}
