//! # rovib - 红外转振光谱分析工具
//!
//! 从甲烷红外吸收光谱中提取转动常数 B，并推导转动惯量与 C–H 键长。
//!
//! ## 子命令
//! - `analyze` - 单个光谱文件分析
//!   - `basic` - 概要与原始光谱图
//!   - `peaks` / `dips` - 特征检测
//!   - `full` - 分带、间距法 + 梯度法估计 B、推导分子常数
//! - `plot` - 批量绘制目录中的光谱文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (光谱 CSV 解析)
//!   │     ├── analysis/  (特征检测、分带、估计、推导)
//!   │     ├── plot/      (plotters 绘图)
//!   │     ├── batch/     (批量文件处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```
//!
//! 日志级别由 `RUST_LOG` 控制，默认 `warn`。

mod analysis;
mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod plot;
mod utils;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        log::debug!("Command failed: {:?}", e);
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
