//! # run 子命令 CLI 定义
//!
//! 计算势能地形并导出特性曲线（单文件或批量目录）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 输出目录已存在时的处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OnExists {
    /// Abort if the output directory already exists
    #[default]
    Fail,
    /// Reuse the existing directory, overwriting artifacts
    Overwrite,
    /// Create the first free '<dir>_N' directory instead
    Suffix,
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// PNG image
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input: adsorption system file or directory of input files
    pub input: PathBuf,

    /// Output directory (batch mode: one subdirectory per input)
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Grid points along each lattice direction
    #[arg(short, long, default_value_t = 20)]
    pub size: usize,

    /// Number of potential thresholds on the characteristic curve
    #[arg(long, default_value_t = 30)]
    pub points: usize,

    /// What to do when the output directory already exists
    #[arg(long, value_enum, default_value = "fail")]
    pub on_exists: OnExists,

    /// Image format for the plots
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: PlotFormat,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Also write the full grid to potential_grid.csv
    #[arg(long, default_value_t = false)]
    pub export_grid: bool,

    /// Number of worker threads (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.inp,*.in")
    #[arg(long, default_value = "*.inp,*.in,*.txt")]
    pub pattern: String,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}
