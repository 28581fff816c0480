//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `analysis/`, `plot/`, `batch/`, `utils/`
//! - 子模块: analyze, plot

pub mod analyze;
pub mod plot;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Analyze(args) => analyze::execute(args),
        Commands::Plot(args) => plot::execute(args),
    }
}
