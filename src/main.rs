//! # Qpore - 多孔骨架吸附势能地形工具
//!
//! 计算探针分子在周期性多孔骨架晶胞中的 LJ + Coulomb 相互作用势网格，
//! 并由势能网格导出吸附特性曲线（势 vs 可及孔体积）。
//!
//! ## 子命令
//! - `run` - 势能网格、特性曲线、绘图（单文件或目录批量）
//! - `inspect` - 解析并校验输入文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (输入文件解析)
//!   │     ├── landscape/ (势能网格、特性曲线、导出、绘图)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod landscape;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
