//! # 数据导出
//!
//! 导出特性曲线和势能网格。
//!
//! ## 支持格式
//! - DAT: 特性曲线，制表符分隔，`#` 开头的表头
//! - CSV: 完整网格 (i, j, k, x, y, z, energy)
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `landscape/curve.rs`, `landscape/grid.rs`
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{QporeError, Result};
use crate::landscape::curve::CharacteristicCurve;
use crate::landscape::grid::PotentialGrid;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 特性曲线表头
pub const CHARACTERISTIC_HEADER: &str = "# Potential [kJ/mol] \t Volume [ml/g]";

/// 导出特性曲线为 DAT 格式
pub fn write_characteristic(curve: &CharacteristicCurve, output_path: &Path) -> Result<()> {
    let write_error = |e: std::io::Error| QporeError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", CHARACTERISTIC_HEADER).map_err(write_error)?;
    for point in &curve.points {
        writeln!(writer, "{:.10e}\t{:.10e}", point.potential, point.volume).map_err(write_error)?;
    }

    writer.flush().map_err(write_error)?;
    Ok(())
}

/// 网格 CSV 行
#[derive(Serialize)]
struct GridRow {
    i: usize,
    j: usize,
    k: usize,
    x: f64,
    y: f64,
    z: f64,
    energy: f64,
}

/// 导出完整网格为 CSV 格式
pub fn write_grid_csv(grid: &PotentialGrid, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for ([i, j, k], point) in grid.indexed() {
        wtr.serialize(GridRow {
            i,
            j,
            k,
            x: point.position[0],
            y: point.position[1],
            z: point.position[2],
            energy: point.energy,
        })?;
    }

    wtr.flush().map_err(|e| QporeError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::curve::CurvePoint;
    use crate::landscape::grid::GridEvaluator;
    use crate::models::{
        AdsorptionSystem, AtomSpecies, FrameworkAtom, LatticeParameters, SpeciesTable,
    };
    use std::fs;

    #[test]
    fn test_write_characteristic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characteristic.dat");

        let curve = CharacteristicCurve {
            points: vec![
                CurvePoint {
                    potential: 8.5,
                    volume: 0.001,
                },
                CurvePoint {
                    potential: 1e-6,
                    volume: 0.25,
                },
            ],
            cell_mass: 1e-21,
            cell_volume: 1000.0,
        };
        write_characteristic(&curve, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# Potential [kJ/mol] \t Volume [ml/g]");

        let row: Vec<f64> = lines[2]
            .split('\t')
            .map(|s| s.parse().unwrap())
            .collect();
        assert!((row[0] - 1e-6).abs() < 1e-15);
        assert!((row[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_write_grid_csv() {
        let mut species = SpeciesTable::new();
        species.insert("X", AtomSpecies::new(1.0, 3.0, 0.0, 12.0));
        let system = AdsorptionSystem::new(
            "x",
            species,
            LatticeParameters::new(10.0, 10.0, 10.0, 90.0, 90.0, 90.0),
            vec![FrameworkAtom::new("X", [0.0, 0.0, 0.0])],
            "X",
        );
        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(3, None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("potential_grid.csv");
        write_grid_csv(&grid, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "i,j,k,x,y,z,energy");
        assert_eq!(lines.len(), 28);
        assert!(lines[27].starts_with("2,2,2,"));
    }
}
