//! # 图表生成
//!
//! 使用 `plotters` 库绘制势能地形和特性曲线。
//!
//! ## 功能
//! - 势能地形：网格点 3D 散点图，按能量着色
//! - 特性曲线：可及体积 vs 吸附势
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `landscape/grid.rs`, `landscape/curve.rs`
//! - 使用 `plotters` 渲染图表

use crate::error::{QporeError, Result};
use crate::landscape::curve::CharacteristicCurve;
use crate::landscape::grid::PotentialGrid;

use plotters::prelude::*;
use std::path::Path;

/// 图像尺寸与格式
#[derive(Debug, Clone, Copy)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

/// 生成势能地形 3D 散点图
pub fn plot_landscape(
    grid: &PotentialGrid,
    output_path: &Path,
    title: &str,
    style: PlotStyle,
) -> Result<()> {
    if style.use_svg {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_landscape(&root, grid, title)?;
        root.present()
            .map_err(|e| QporeError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_landscape(&root, grid, title)?;
        root.present()
            .map_err(|e| QporeError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 生成特性曲线图
pub fn plot_characteristic(
    curve: &CharacteristicCurve,
    output_path: &Path,
    title: &str,
    style: PlotStyle,
) -> Result<()> {
    if style.use_svg {
        let root = SVGBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_characteristic(&root, curve, title)?;
        root.present()
            .map_err(|e| QporeError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (style.width, style.height)).into_drawing_area();
        draw_characteristic(&root, curve, title)?;
        root.present()
            .map_err(|e| QporeError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制 3D 散点图的核心逻辑
fn draw_landscape<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &PotentialGrid,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    let (x_range, y_range, z_range) = axis_ranges(grid);
    let e_min = grid.min_energy();

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(20)
        .build_cartesian_3d(x_range, y_range, z_range)
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    // 能量为 0 的点不可及，画成浅灰色
    let points = grid.points();
    chart
        .draw_series(points.iter().filter(|p| p.energy >= 0.0).map(|p| {
            Circle::new(
                (p.position[0], p.position[1], p.position[2]),
                2,
                RGBColor(210, 210, 210).mix(0.3).filled(),
            )
        }))
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(points.iter().filter(|p| p.energy < 0.0).map(|p| {
            Circle::new(
                (p.position[0], p.position[1], p.position[2]),
                3,
                energy_color(p.energy, e_min).filled(),
            )
        }))
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    let legend = format!("E_min = {:.3} kJ/mol", e_min);
    root.draw(&Text::new(
        legend,
        (30, 60),
        ("sans-serif", 16).into_font().color(&BLACK),
    ))
    .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

/// 绘制特性曲线的核心逻辑
fn draw_characteristic<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &CharacteristicCurve,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    let x_max = curve
        .points
        .iter()
        .map(|p| p.potential)
        .fold(0.0_f64, f64::max);
    let y_max = curve.points.iter().map(|p| p.volume).fold(0.0_f64, f64::max);

    // 全零曲线也要有可画的坐标范围
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Potential [kJ/mol]")
        .y_desc("Volume [ml/g]")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            curve.points.iter().map(|p| (p.potential, p.volume)),
            line_color.stroke_width(2),
        ))
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(
            curve
                .points
                .iter()
                .map(|p| Circle::new((p.potential, p.volume), 4, line_color.filled())),
        )
        .map_err(|e| QporeError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

/// 笛卡尔坐标范围，留出 5% 边距
fn axis_ranges(
    grid: &PotentialGrid,
) -> (
    std::ops::Range<f64>,
    std::ops::Range<f64>,
    std::ops::Range<f64>,
) {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for p in grid.points() {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p.position[axis]);
            hi[axis] = hi[axis].max(p.position[axis]);
        }
    }

    let range = |axis: usize| {
        let span = (hi[axis] - lo[axis]).max(1.0);
        (lo[axis] - 0.05 * span)..(hi[axis] + 0.05 * span)
    };

    (range(0), range(1), range(2))
}

/// 能量 → 颜色：最低能量为深蓝，接近 0 为黄色
fn energy_color(energy: f64, e_min: f64) -> RGBColor {
    const STOPS: [(f64, (u8, u8, u8)); 3] = [
        (0.0, (253, 231, 37)),
        (0.5, (33, 145, 140)),
        (1.0, (68, 1, 84)),
    ];

    let t = if e_min < 0.0 {
        (energy / e_min).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (lower, upper) = if t <= STOPS[1].0 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let local = (t - lower.0) / (upper.0 - lower.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * local).round() as u8;

    RGBColor(
        lerp(lower.1 .0, upper.1 .0),
        lerp(lower.1 .1, upper.1 .1),
        lerp(lower.1 .2, upper.1 .2),
    )
}
