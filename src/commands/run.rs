//! # run 命令实现
//!
//! 计算势能网格，导出特性曲线并绘图。
//!
//! ## 功能
//! - 单文件：完整流程 + 汇总表
//! - 目录：批量处理，每个结构一个输出子目录
//! - 输出目录冲突策略 (`--on-exists`)
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `parsers/`, `landscape/`, `batch/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/outdir.rs`

use crate::batch::{resolve_jobs, BatchRunner, FileCollector, ProcessResult};
use crate::cli::run::{OnExists, PlotFormat, RunArgs};
use crate::error::{QporeError, Result};
use crate::landscape::curve::THRESHOLD_CEILING;
use crate::landscape::export::{write_characteristic, write_grid_csv};
use crate::landscape::plot::{plot_characteristic, plot_landscape, PlotStyle};
use crate::landscape::{CurveBuilder, GridEvaluator};
use crate::models::AdsorptionSystem;
use crate::parsers;
use crate::utils::outdir::prepare_output_dir;
use crate::utils::{output, progress};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 计算流程的设置（与 CLI 解耦）
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub size: usize,
    pub points: usize,
    pub plot: Option<(PlotFormat, PlotStyle)>,
    pub export_grid: bool,
}

impl RunSettings {
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        if args.size == 0 {
            return Err(QporeError::InvalidArgument(
                "--size must be greater than 0".to_string(),
            ));
        }
        if args.points < 2 {
            return Err(QporeError::InvalidArgument(format!(
                "--points must be at least 2, got {}",
                args.points
            )));
        }

        let plot = (!args.no_plot).then(|| {
            (
                args.format,
                PlotStyle {
                    width: args.width,
                    height: args.height,
                    use_svg: args.format == PlotFormat::Svg,
                },
            )
        });

        Ok(RunSettings {
            size: args.size,
            points: args.points,
            plot,
            export_grid: args.export_grid,
        })
    }
}

/// 单个体系的计算结果概要
#[derive(Debug)]
pub struct RunSummary {
    pub grid_size: usize,
    pub grid_points: usize,
    pub min_energy: f64,
    pub attractive_fraction: f64,
    pub total_volume: f64,
    pub cell_mass: f64,
    pub cell_volume: f64,
    pub artifacts: Vec<(&'static str, PathBuf)>,
}

impl RunSummary {
    /// 网格中没有低于阈值上限的点
    pub fn is_flat(&self) -> bool {
        self.min_energy > THRESHOLD_CEILING
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    let settings = RunSettings::from_args(&args)?;

    if !args.input.exists() {
        return Err(QporeError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(resolve_jobs(args.jobs))
        .build_global()
        .ok();

    if args.input.is_dir() {
        run_batch(&args, &settings)
    } else {
        run_single(&args, &settings)
    }
}

/// 单文件模式
fn run_single(args: &RunArgs, settings: &RunSettings) -> Result<()> {
    let system = parsers::load_system(&args.input)?;

    output::print_header(&format!("Potential landscape: {}", system.name));
    output::print_info(&format!(
        "{} framework atoms, probe '{}', {}³ grid",
        system.atoms.len(),
        system.probe,
        settings.size
    ));

    let out_dir = prepare_output_dir(&args.output, args.on_exists)?;
    if out_dir != args.output {
        output::print_info(&format!(
            "'{}' exists, writing to '{}'",
            args.output.display(),
            out_dir.display()
        ));
    }

    let summary = process_system(&system, &out_dir, settings, true)?;

    if summary.is_flat() {
        output::print_warning(&format!(
            "No grid point lies below {:e} kJ/mol; the characteristic curve is flat",
            THRESHOLD_CEILING
        ));
    }

    println!("{}", Table::new(summary_rows(&summary)));
    println!();

    for (label, path) in &summary.artifacts {
        output::print_artifact(label, path);
    }

    output::print_done(&format!("Results written to '{}'", out_dir.display()));
    Ok(())
}

/// 目录批量模式
fn run_batch(args: &RunArgs, settings: &RunSettings) -> Result<()> {
    output::print_header("Batch potential landscapes");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} input files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| QporeError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let jobs: Vec<(PathBuf, PathBuf)> = batch_subdirs(&files, &args.input)?
        .into_iter()
        .map(|(file, name)| (file, args.output.join(name)))
        .collect();

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(jobs, |(file, target)| {
        process_batch_file(file, target, args.on_exists, settings)
    })?;

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    output::print_separator();
    output::print_done(&format!(
        "Processed {} structures into '{}': {} ok, {} skipped, {} failed",
        result.total(),
        args.output.display(),
        result.success,
        result.skipped,
        result.failed
    ));

    Ok(())
}

/// 每个输入文件对应的输出子目录名
///
/// 默认取主文件名；主文件名重复（如 `zeo.inp` 与 `zeo.txt`）时改用相对路径，
/// 其中的路径分隔符和 `.` 替换为 `_`。仍然重名时报错。
fn batch_subdirs(files: &[PathBuf], input_root: &Path) -> Result<Vec<(PathBuf, String)>> {
    let stem_of = |file: &Path| {
        file.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("structure")
            .to_string()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for file in files {
        *stem_counts.entry(stem_of(file)).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    files
        .iter()
        .map(|file| {
            let stem = stem_of(file);
            let name = if stem_counts[&stem] > 1 {
                file.strip_prefix(input_root)
                    .unwrap_or(file)
                    .to_string_lossy()
                    .replace(|c: char| c == '/' || c == '\\' || c == '.', "_")
            } else {
                stem
            };

            if !seen.insert(name.clone()) {
                return Err(QporeError::InvalidArgument(format!(
                    "'{}' maps to output directory '{}', which another input already uses",
                    file.display(),
                    name
                )));
            }
            Ok((file.clone(), name))
        })
        .collect()
}

/// 批量模式下处理单个输入文件
fn process_batch_file(
    file: &Path,
    target: &Path,
    policy: OnExists,
    settings: &RunSettings,
) -> ProcessResult {
    let file_str = file.display().to_string();

    if policy == OnExists::Fail && target.exists() {
        return ProcessResult::Skipped(file_str);
    }

    let outcome = parsers::load_system(file).and_then(|system| {
        let out_dir = prepare_output_dir(target, policy)?;
        process_system(&system, &out_dir, settings, false)
    });

    match outcome {
        Ok(_) => ProcessResult::Success(file_str),
        Err(QporeError::OutputExists { .. }) => ProcessResult::Skipped(file_str),
        Err(e) => ProcessResult::Failed(file_str, e.to_string()),
    }
}

/// 网格 → 特性曲线 → 导出 → 绘图
pub fn process_system(
    system: &AdsorptionSystem,
    out_dir: &Path,
    settings: &RunSettings,
    show_progress: bool,
) -> Result<RunSummary> {
    let evaluator = GridEvaluator::new(system)?;

    let pb = show_progress
        .then(|| progress::create_progress_bar(settings.size as u64, "Evaluating grid"));
    let grid = evaluator.evaluate(settings.size, pb.as_ref())?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let curve = CurveBuilder::new(settings.points).build(system, &grid)?;

    let mut artifacts = Vec::new();

    let dat_path = out_dir.join("characteristic.dat");
    write_characteristic(&curve, &dat_path)?;
    artifacts.push(("characteristic curve", dat_path));

    if settings.export_grid {
        let csv_path = out_dir.join("potential_grid.csv");
        write_grid_csv(&grid, &csv_path)?;
        artifacts.push(("potential grid", csv_path));
    }

    if let Some((format, style)) = settings.plot {
        let spinner = show_progress.then(|| progress::create_spinner("Rendering plots"));

        let landscape_path = out_dir.join(format!("potential_landscape.{}", format.extension()));
        plot_landscape(
            &grid,
            &landscape_path,
            &format!("{} - potential landscape", system.name),
            style,
        )?;
        artifacts.push(("landscape plot", landscape_path));

        let curve_path = out_dir.join(format!("characteristic.{}", format.extension()));
        plot_characteristic(
            &curve,
            &curve_path,
            &format!("{} - characteristic curve", system.name),
            style,
        )?;
        artifacts.push(("characteristic plot", curve_path));

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    Ok(RunSummary {
        grid_size: grid.size(),
        grid_points: grid.len(),
        min_energy: grid.min_energy(),
        attractive_fraction: grid.attractive_fraction(),
        total_volume: curve.total_volume(),
        cell_mass: curve.cell_mass,
        cell_volume: curve.cell_volume,
        artifacts,
    })
}

fn summary_rows(summary: &RunSummary) -> Vec<SummaryRow> {
    let row = |quantity: &str, value: String| SummaryRow {
        quantity: quantity.to_string(),
        value,
    };

    vec![
        row(
            "Grid",
            format!(
                "{0}×{0}×{0} ({1} points)",
                summary.grid_size, summary.grid_points
            ),
        ),
        row("Grid minimum [kJ/mol]", format!("{:.4}", summary.min_energy)),
        row(
            "Accessible fraction",
            format!("{:.2}%", summary.attractive_fraction * 100.0),
        ),
        row(
            "Accessible volume [ml/g]",
            format!("{:.6e}", summary.total_volume),
        ),
        row("Cell mass [g]", format!("{:.6e}", summary.cell_mass)),
        row("Cell volume [Å³]", format!("{:.3}", summary.cell_volume)),
    ]
}
