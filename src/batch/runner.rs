//! # 批量执行器
//!
//! 在 rayon 线程池中并行处理文件列表，汇总成功/跳过/失败数量。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::error::{Result, RovibError};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    Success(String),
    /// 跳过（如输出已存在）
    Skipped(String),
    /// (文件路径, 错误信息)
    Failed(String, String),
}

/// 批量处理统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(msg) => {
                log::debug!("{}", msg);
                self.success += 1;
            }
            ProcessResult::Skipped(msg) => {
                log::debug!("{}", msg);
                self.skipped += 1;
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    jobs: usize,
}

impl BatchRunner {
    /// jobs = 0 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| RovibError::Other(format!("failed to start thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_tallies_results() {
        let files: Vec<PathBuf> = (0..9).map(|i| PathBuf::from(format!("{}.csv", i))).collect();

        let runner = BatchRunner::new(2);
        assert_eq!(runner.jobs(), 2);

        let result = runner
            .run(files, |f| {
                let stem: usize = f.file_stem().unwrap().to_str().unwrap().parse().unwrap();
                match stem % 3 {
                    0 => ProcessResult::Success(format!("{} ok", stem)),
                    1 => ProcessResult::Skipped(format!("{} skipped", stem)),
                    _ => ProcessResult::Failed(f.display().to_string(), "bad".to_string()),
                }
            })
            .unwrap();

        assert_eq!(result.success, 3);
        assert_eq!(result.skipped, 3);
        assert_eq!(result.failed, 3);
        assert_eq!(result.total(), 9);
        assert_eq!(result.failures.len(), 3);
    }

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
    }
}
