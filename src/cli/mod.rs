//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 计算势能地形和特性曲线
//! - `inspect`: 校验输入文件并打印体系概要
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, inspect

pub mod inspect;
pub mod run;

use clap::{Parser, Subcommand};

/// Qpore - 多孔骨架吸附势能地形工具
#[derive(Parser)]
#[command(name = "qpore")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Guest-host potential landscapes and characteristic curves for porous frameworks",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the potential landscape and characteristic curve
    Run(run::RunArgs),

    /// Parse and validate an input file, then print a summary
    Inspect(inspect::InspectArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use run::{OnExists, PlotFormat};

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["qpore", "run", "zeolite.inp"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.size, 20);
                assert_eq!(args.points, 30);
                assert_eq!(args.on_exists, OnExists::Fail);
                assert_eq!(args.format, PlotFormat::Png);
                assert_eq!(args.output.to_str(), Some("output"));
                assert!(!args.no_plot);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::parse_from([
            "qpore",
            "run",
            "cases/",
            "-s",
            "40",
            "--on-exists",
            "suffix",
            "-f",
            "svg",
            "--export-grid",
            "-j",
            "4",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.size, 40);
                assert_eq!(args.on_exists, OnExists::Suffix);
                assert_eq!(args.format.extension(), "svg");
                assert!(args.export_grid);
                assert_eq!(args.jobs, 4);
            }
            _ => panic!("expected run command"),
        }
    }
}
