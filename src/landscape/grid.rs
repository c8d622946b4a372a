//! # 势能网格计算器
//!
//! 在晶胞内均匀分数网格上计算探针与骨架的相互作用能。
//!
//! ## 算法概述
//! 1. 构建分数 → 笛卡尔变换和 27 个镜像偏移（每次计算一次）
//! 2. 预先混合每个骨架原子与探针的 σ/ε/q₁q₂
//! 3. 对每个网格点累加所有原子、所有镜像的 LJ + Coulomb 能量
//!    - 0.5σ < r < 5σ：累加
//!    - r ≤ 0.5σ：硬核重叠，该点能量为 0 并立即结束
//!    - r ≥ 5σ：忽略
//! 4. 正能量截断为 0，再换算为 kJ/mol
//!
//! 网格点按 i 平面并行（rayon），每个平面写入输出缓冲区中互不重叠的区间。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `landscape/lattice.rs`, `landscape/energy.rs`
//! - 使用 `models/structure.rs` 的 AdsorptionSystem

use crate::error::{QporeError, Result};
use crate::landscape::constants::JOULE_TO_KJ_PER_MOL;
use crate::landscape::curve::THRESHOLD_CEILING;
use crate::landscape::energy::PairParameters;
use crate::landscape::lattice::{distance, CellTransform};
use crate::models::AdsorptionSystem;

use indicatif::ProgressBar;
use rayon::prelude::*;

/// 硬核半径系数（相对 σ_mix）
pub const OVERLAP_FACTOR: f64 = 0.5;

/// 截断半径系数（相对 σ_mix）
pub const CUTOFF_FACTOR: f64 = 5.0;

/// 单个网格点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// 笛卡尔坐标（Å）
    pub position: [f64; 3],
    /// 相互作用能（kJ/mol），恒 ≤ 0
    pub energy: f64,
}

/// size × size × size 势能网格
#[derive(Debug, Clone)]
pub struct PotentialGrid {
    size: usize,
    /// 按 (i·size + j)·size + k 顺序存储
    points: Vec<GridPoint>,
}

impl PotentialGrid {
    /// 每个方向的采样数
    pub fn size(&self) -> usize {
        self.size
    }

    /// 网格点总数
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// 带 (i, j, k) 索引遍历
    pub fn indexed(&self) -> impl Iterator<Item = ([usize; 3], &GridPoint)> {
        let n = self.size;
        self.points
            .iter()
            .enumerate()
            .map(move |(idx, p)| ([idx / (n * n), (idx / n) % n, idx % n], p))
    }

    /// 全局最低能量
    pub fn min_energy(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.energy)
            .fold(f64::INFINITY, f64::min)
    }

    /// 能量不高于阈值上限的网格点比例，与特性曲线最后一行的体积对应
    pub fn attractive_fraction(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let count = self
            .points
            .iter()
            .filter(|p| p.energy <= THRESHOLD_CEILING)
            .count();
        count as f64 / self.points.len() as f64
    }
}

/// 已解析的骨架相互作用位点
#[derive(Debug, Clone, Copy)]
struct Site {
    position: [f64; 3],
    pair: PairParameters,
}

/// 势能网格计算器
pub struct GridEvaluator {
    transform: CellTransform,
    offsets: Vec<[f64; 3]>,
    sites: Vec<Site>,
}

impl GridEvaluator {
    /// 构建计算器；种类查找在这里一次完成，不进入热循环
    pub fn new(system: &AdsorptionSystem) -> Result<Self> {
        let transform = CellTransform::from_parameters(&system.lattice)?;
        let offsets = transform.image_offsets();

        let probe = system.species.lookup(&system.probe, "PROBE")?;

        let sites = system
            .atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| {
                let species = system
                    .species
                    .lookup(&atom.species, &format!("FRAMEWORK atom #{}", i + 1))?;
                Ok(Site {
                    position: atom.position,
                    pair: PairParameters::mix(species, probe),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            transform,
            offsets,
            sites,
        })
    }

    /// 网格索引 → 分数坐标，[0, 1] 两端都包含
    pub fn fraction(index: usize, size: usize) -> f64 {
        if size <= 1 {
            0.0
        } else {
            index as f64 / (size - 1) as f64
        }
    }

    /// 计算完整网格；`progress` 每完成一个 i 平面前进一步
    pub fn evaluate(&self, size: usize, progress: Option<&ProgressBar>) -> Result<PotentialGrid> {
        if size == 0 {
            return Err(QporeError::InvalidArgument(
                "grid size must be greater than 0".to_string(),
            ));
        }

        let plane = size * size;
        let mut points = vec![
            GridPoint {
                position: [0.0; 3],
                energy: 0.0,
            };
            plane * size
        ];

        points
            .par_chunks_mut(plane)
            .enumerate()
            .for_each(|(i, chunk)| {
                let fa = Self::fraction(i, size);
                for (offset, point) in chunk.iter_mut().enumerate() {
                    let fb = Self::fraction(offset / size, size);
                    let fc = Self::fraction(offset % size, size);

                    let position = self.transform.to_cartesian([fa, fb, fc]);
                    *point = GridPoint {
                        position,
                        energy: self.point_energy(&position),
                    };
                }
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            });

        Ok(PotentialGrid { size, points })
    }

    /// 单点能量（kJ/mol），已截断为 ≤ 0
    pub fn point_energy(&self, position: &[f64; 3]) -> f64 {
        let raw = self.accumulate(position).unwrap_or(0.0);

        let clamped = if raw > 0.0 { 0.0 } else { raw };
        clamped * JOULE_TO_KJ_PER_MOL
    }

    /// 累加原始能量（J）；遇到硬核重叠返回 None
    fn accumulate(&self, position: &[f64; 3]) -> Option<f64> {
        let mut total = 0.0;

        for site in &self.sites {
            let hard_core = OVERLAP_FACTOR * site.pair.sigma;
            let cutoff = CUTOFF_FACTOR * site.pair.sigma;

            for offset in &self.offsets {
                let image = [
                    site.position[0] + offset[0],
                    site.position[1] + offset[1],
                    site.position[2] + offset[2],
                ];
                let r = distance(position, &image);

                if r <= hard_core {
                    return None;
                }
                if r < cutoff {
                    total += site.pair.energy(r);
                }
            }
        }

        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::energy::{coulomb_energy, lennard_jones_energy};
    use crate::models::{AtomSpecies, FrameworkAtom, LatticeParameters, SpeciesTable};

    fn single_atom_system(cell: f64, atom: [f64; 3]) -> AdsorptionSystem {
        let mut species = SpeciesTable::new();
        species.insert("X", AtomSpecies::new(1.0, 3.0, 0.0, 12.0));

        AdsorptionSystem::new(
            "single",
            species,
            LatticeParameters::new(cell, cell, cell, 90.0, 90.0, 90.0),
            vec![FrameworkAtom::new("X", atom)],
            "X",
        )
    }

    #[test]
    fn test_end_to_end_two_point_grid() {
        let system = single_atom_system(10.0, [0.0, 0.0, 0.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();
        let grid = evaluator.evaluate(2, None).unwrap();

        assert_eq!(grid.size(), 2);
        assert_eq!(grid.len(), 8);

        for ([i, j, k], point) in grid.indexed() {
            let expected = [i as f64 * 10.0, j as f64 * 10.0, k as f64 * 10.0];
            for axis in 0..3 {
                assert!((point.position[axis] - expected[axis]).abs() < 1e-12);
            }
            // 每个角点都与原子的某个镜像重合
            assert_eq!(point.energy, 0.0);
        }
    }

    #[test]
    fn test_grid_energies_never_positive() {
        let mut species = SpeciesTable::new();
        species.insert("O", AtomSpecies::new(53.0, 3.3, -0.8, 15.999));
        species.insert("Na", AtomSpecies::new(15.0, 2.6, 1.0, 22.99));
        species.insert("Ar", AtomSpecies::new(119.8, 3.4, 0.0, 39.948));

        let system = AdsorptionSystem::new(
            "ionic",
            species,
            LatticeParameters::new(9.0, 10.0, 11.0, 85.0, 95.0, 100.0),
            vec![
                FrameworkAtom::new("O", [0.0, 0.0, 0.0]),
                FrameworkAtom::new("Na", [4.0, 4.0, 4.0]),
                FrameworkAtom::new("O", [2.0, 6.5, 1.0]),
            ],
            "Ar",
        );

        let grid = GridEvaluator::new(&system).unwrap().evaluate(6, None).unwrap();
        assert_eq!(grid.len(), 216);
        assert!(grid.points().iter().all(|p| p.energy <= 0.0));
        assert!(grid.min_energy() < 0.0);
    }

    #[test]
    fn test_hard_core_short_circuit_ignores_other_atoms() {
        // 第二个原子单独会给出很强的吸引
        let mut species = SpeciesTable::new();
        species.insert("X", AtomSpecies::new(1.0, 3.0, 0.0, 12.0));
        species.insert("Deep", AtomSpecies::new(5000.0, 3.0, 0.0, 12.0));

        let system = AdsorptionSystem::new(
            "overlap",
            species,
            LatticeParameters::new(20.0, 20.0, 20.0, 90.0, 90.0, 90.0),
            vec![
                FrameworkAtom::new("Deep", [10.0, 10.0, 13.5]),
                FrameworkAtom::new("X", [10.0, 10.0, 10.5]),
            ],
            "X",
        );
        let evaluator = GridEvaluator::new(&system).unwrap();

        // 距 X 原子 0.5 Å < 0.5σ = 1.5 Å
        assert_eq!(evaluator.point_energy(&[10.0, 10.0, 10.0]), 0.0);
        // 远离 X 后 Deep 的吸引生效
        assert!(evaluator.point_energy(&[10.0, 10.0, 7.0]) < 0.0);
    }

    #[test]
    fn test_single_image_energy_matches_pair_formula() {
        let system = single_atom_system(40.0, [20.0, 20.0, 20.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();

        // r = 3.5 Å，其它镜像都在 5σ = 15 Å 之外
        let e = evaluator.point_energy(&[20.0, 20.0, 23.5]);
        let expected =
            (lennard_jones_energy(3.0, 1.0, 3.5) + coulomb_energy(0.0, 3.5)) * JOULE_TO_KJ_PER_MOL;
        assert!((e - expected).abs() < 1e-12);
        assert!(e < 0.0);
    }

    #[test]
    fn test_repulsive_total_is_clamped() {
        // 2.0 Å 处 LJ 为正，但大于 0.5σ
        let system = single_atom_system(40.0, [20.0, 20.0, 20.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();
        assert!(lennard_jones_energy(3.0, 1.0, 2.0) > 0.0);
        assert_eq!(evaluator.point_energy(&[20.0, 20.0, 22.0]), 0.0);
    }

    #[test]
    fn test_beyond_cutoff_contributes_nothing() {
        let system = single_atom_system(100.0, [50.0, 50.0, 50.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();
        assert_eq!(evaluator.point_energy(&[50.0, 50.0, 65.5]), 0.0);
    }

    #[test]
    fn test_hard_core_radius_is_inclusive() {
        let system = single_atom_system(100.0, [20.0, 20.0, 20.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();

        // r = 1.5 Å = 0.5σ 恰好落在硬核上
        assert_eq!(evaluator.accumulate(&[21.5, 20.0, 20.0]), None);
        assert_eq!(evaluator.point_energy(&[21.5, 20.0, 20.0]), 0.0);

        // 略大于 0.5σ 时正常累加（强排斥）
        let outside = evaluator.accumulate(&[21.75, 20.0, 20.0]).unwrap();
        assert!(outside > 0.0);
    }

    #[test]
    fn test_cutoff_radius_is_exclusive() {
        let mut species = SpeciesTable::new();
        species.insert("X", AtomSpecies::new(1.0, 3.0, 0.0, 12.0));

        let system = AdsorptionSystem::new(
            "cutoff",
            species,
            LatticeParameters::new(100.0, 100.0, 100.0, 90.0, 90.0, 90.0),
            vec![
                FrameworkAtom::new("X", [20.0, 20.0, 20.0]),
                FrameworkAtom::new("X", [35.0, 20.0, 24.0]),
            ],
            "X",
        );
        let evaluator = GridEvaluator::new(&system).unwrap();

        // 第一个原子恰好在 5σ = 15 Å 处，只剩第二个原子 (r = 4 Å) 的贡献
        let position = [35.0, 20.0, 20.0];
        let pair = evaluator.sites[1].pair;
        assert_eq!(evaluator.accumulate(&position), Some(pair.energy(4.0)));
        assert!(lennard_jones_energy(3.0, 1.0, 15.0) != 0.0);
    }

    #[test]
    fn test_fraction_sampling() {
        assert_eq!(GridEvaluator::fraction(0, 1), 0.0);
        assert_eq!(GridEvaluator::fraction(0, 5), 0.0);
        assert_eq!(GridEvaluator::fraction(4, 5), 1.0);
        assert!((GridEvaluator::fraction(1, 5) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_zero_size_rejected() {
        let system = single_atom_system(10.0, [0.0, 0.0, 0.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();
        assert!(evaluator.evaluate(0, None).is_err());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let system = single_atom_system(12.0, [3.0, 4.0, 5.0]);
        let evaluator = GridEvaluator::new(&system).unwrap();
        let size = 5;
        let grid = evaluator.evaluate(size, None).unwrap();

        for ([i, j, k], point) in grid.indexed() {
            let frac = [
                GridEvaluator::fraction(i, size),
                GridEvaluator::fraction(j, size),
                GridEvaluator::fraction(k, size),
            ];
            let position = evaluator.transform.to_cartesian(frac);
            assert_eq!(point.position, position);
            assert_eq!(point.energy, evaluator.point_energy(&position));
        }
        let corner = grid.points()[grid.len() - 1].position;
        assert!(corner.iter().all(|v| (v - 12.0).abs() < 1e-12));
    }
}
