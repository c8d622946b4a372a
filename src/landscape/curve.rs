//! # 特性曲线构建
//!
//! 由势能网格积分得到 "吸附势 − 可及孔体积" 特性曲线。
//!
//! ## 算法概述
//! 1. 晶胞质量 (g) = Σ 原子质量 (amu) × 原子质量常数 × 1e3
//! 2. 晶胞体积 (Å³) 由晶胞参数计算
//! 3. 单点体积 (mL) = V × 1e-24 / size³
//! 4. 在 [网格最低能量, −1e-6] 上取等距阈值
//! 5. 每个阈值下统计能量 ≤ 阈值的网格点，体积 (mL/g) = 点数 × 单点体积 / 质量
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `landscape/grid.rs` 的 PotentialGrid
//! - 使用 `models/structure.rs` 的 AdsorptionSystem

use crate::error::{QporeError, Result};
use crate::landscape::constants::{AMU_TO_GRAM, CUBIC_ANGSTROM_TO_ML};
use crate::landscape::grid::PotentialGrid;
use crate::models::AdsorptionSystem;

/// 默认采样点数
pub const DEFAULT_CURVE_POINTS: usize = 30;

/// 阈值上限（kJ/mol），不取到 0
pub const THRESHOLD_CEILING: f64 = -1.0e-6;

/// 特性曲线上的一个点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// 吸附势大小 −阈值（kJ/mol）
    pub potential: f64,
    /// 累积可及体积（mL/g）
    pub volume: f64,
}

/// 特性曲线
#[derive(Debug, Clone)]
pub struct CharacteristicCurve {
    /// 按阈值升序（势大小降序）排列
    pub points: Vec<CurvePoint>,
    /// 晶胞质量（g）
    pub cell_mass: f64,
    /// 晶胞体积（Å³）
    pub cell_volume: f64,
}

impl CharacteristicCurve {
    /// 最大可及体积（最后一个阈值处）
    pub fn total_volume(&self) -> f64 {
        self.points.last().map(|p| p.volume).unwrap_or(0.0)
    }
}

/// 特性曲线构建器
pub struct CurveBuilder {
    points: usize,
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_POINTS)
    }
}

impl CurveBuilder {
    pub fn new(points: usize) -> Self {
        Self { points }
    }

    /// 构建特性曲线
    pub fn build(
        &self,
        system: &AdsorptionSystem,
        grid: &PotentialGrid,
    ) -> Result<CharacteristicCurve> {
        if self.points < 2 {
            return Err(QporeError::InvalidArgument(format!(
                "characteristic curve needs at least 2 points, got {}",
                self.points
            )));
        }
        if grid.is_empty() {
            return Err(QporeError::InvalidArgument(
                "potential grid is empty".to_string(),
            ));
        }

        let cell_mass = system.total_mass_amu()? * AMU_TO_GRAM;
        let cell_volume = system.lattice.volume();
        if !(cell_mass > 0.0) || !(cell_volume > 0.0) {
            return Err(QporeError::InvalidArgument(format!(
                "unit cell mass ({:e} g) and volume ({} Å³) must be positive",
                cell_mass, cell_volume
            )));
        }

        let sample_volume = cell_volume * CUBIC_ANGSTROM_TO_ML / grid.len() as f64;

        let points = self
            .thresholds(grid.min_energy())
            .into_iter()
            .map(|threshold| {
                let count = grid
                    .points()
                    .iter()
                    .filter(|p| p.energy <= threshold)
                    .count();
                CurvePoint {
                    potential: -threshold,
                    volume: count as f64 * sample_volume / cell_mass,
                }
            })
            .collect();

        Ok(CharacteristicCurve {
            points,
            cell_mass,
            cell_volume,
        })
    }

    /// 从 `min_energy` 到阈值上限的等距阈值（含两端）
    ///
    /// 阈值始终严格小于 0：能量恰为 0 的点（硬核、截断为 0 的排斥区）不算可及体积。
    /// 网格没有低于上限的点时起点也取上限，所有阈值相同，各行体积都为 0，
    /// 而不是从 0 开始把整个晶胞计入第一行。
    pub fn thresholds(&self, min_energy: f64) -> Vec<f64> {
        let start = min_energy.min(THRESHOLD_CEILING);
        let step = (THRESHOLD_CEILING - start) / (self.points - 1) as f64;

        (0..self.points)
            .map(|k| {
                if k + 1 == self.points {
                    THRESHOLD_CEILING
                } else {
                    start + step * k as f64
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::grid::GridEvaluator;
    use crate::models::{AtomSpecies, FrameworkAtom, LatticeParameters, SpeciesTable};

    fn cage_system() -> AdsorptionSystem {
        let mut species = SpeciesTable::new();
        species.insert("O", AtomSpecies::new(53.0, 3.0, 0.0, 16.0));
        species.insert("Ar", AtomSpecies::new(119.8, 3.4, 0.0, 39.948));

        let atoms = vec![
            FrameworkAtom::new("O", [0.0, 0.0, 0.0]),
            FrameworkAtom::new("O", [6.0, 6.0, 0.0]),
            FrameworkAtom::new("O", [6.0, 0.0, 6.0]),
            FrameworkAtom::new("O", [0.0, 6.0, 6.0]),
        ];

        AdsorptionSystem::new(
            "cage",
            species,
            LatticeParameters::new(12.0, 12.0, 12.0, 90.0, 90.0, 90.0),
            atoms,
            "Ar",
        )
    }

    #[test]
    fn test_thresholds_span_min_to_ceiling() {
        let builder = CurveBuilder::new(30);
        let t = builder.thresholds(-12.5);

        assert_eq!(t.len(), 30);
        assert!((t[0] + 12.5).abs() < 1e-12);
        assert_eq!(t[29], THRESHOLD_CEILING);
        for w in t.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_thresholds_without_attractive_region() {
        let t = CurveBuilder::new(5).thresholds(0.0);
        assert!(t.iter().all(|v| *v == THRESHOLD_CEILING));
    }

    #[test]
    fn test_curve_of_fully_blocked_cell_is_zero() {
        let mut species = SpeciesTable::new();
        species.insert("X", AtomSpecies::new(1.0, 3.0, 0.0, 12.0));
        let system = AdsorptionSystem::new(
            "blocked",
            species,
            LatticeParameters::new(10.0, 10.0, 10.0, 90.0, 90.0, 90.0),
            vec![FrameworkAtom::new("X", [0.0, 0.0, 0.0])],
            "X",
        );

        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(2, None)
            .unwrap();
        assert_eq!(grid.min_energy(), 0.0);

        let curve = CurveBuilder::default().build(&system, &grid).unwrap();
        assert_eq!(curve.points.len(), DEFAULT_CURVE_POINTS);
        assert!(curve.points.iter().all(|p| p.volume == 0.0));
        assert!(curve
            .points
            .iter()
            .all(|p| p.potential == -THRESHOLD_CEILING));
    }

    #[test]
    fn test_accessible_fraction_matches_total_volume() {
        let system = cage_system();
        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(6, None)
            .unwrap();
        let curve = CurveBuilder::new(4).build(&system, &grid).unwrap();

        let from_fraction =
            grid.attractive_fraction() * curve.cell_volume * CUBIC_ANGSTROM_TO_ML / curve.cell_mass;
        assert!(grid.attractive_fraction() > 0.0);
        assert!((curve.total_volume() - from_fraction).abs() <= from_fraction * 1e-9);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let system = cage_system();
        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(8, None)
            .unwrap();
        let curve = CurveBuilder::default().build(&system, &grid).unwrap();

        assert_eq!(curve.points.len(), DEFAULT_CURVE_POINTS);
        for w in curve.points.windows(2) {
            assert!(w[1].volume >= w[0].volume);
            assert!(w[1].potential < w[0].potential);
        }

        // 最低点本身总被计入
        assert!(curve.points[0].volume > 0.0);
        assert!((curve.points[0].potential + grid.min_energy()).abs() < 1e-12);
    }

    #[test]
    fn test_volume_normalisation() {
        let system = cage_system();
        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(6, None)
            .unwrap();
        let curve = CurveBuilder::new(4).build(&system, &grid).unwrap();

        let mass = 4.0 * 16.0 * AMU_TO_GRAM;
        assert!((curve.cell_mass - mass).abs() / mass < 1e-12);
        assert!((curve.cell_volume - 1728.0).abs() < 1e-9);

        let attractive = grid
            .points()
            .iter()
            .filter(|p| p.energy <= THRESHOLD_CEILING)
            .count();
        let expected = attractive as f64 * 1728.0e-24 / 216.0 / mass;
        assert!((curve.total_volume() - expected).abs() <= expected * 1e-9);
    }

    #[test]
    fn test_too_few_points_rejected() {
        let system = cage_system();
        let grid = GridEvaluator::new(&system)
            .unwrap()
            .evaluate(2, None)
            .unwrap();
        assert!(CurveBuilder::new(1).build(&system, &grid).is_err());
    }
}
