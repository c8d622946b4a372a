//! # 多孔骨架结构数据模型
//!
//! 定义晶胞参数、骨架原子以及包含探针的完整吸附体系。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `landscape/` 使用
//! - 使用 `models/species.rs`

use crate::error::{QporeError, Result};
use crate::models::species::SpeciesTable;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 晶胞参数 (a, b, c, alpha, beta, gamma)
/// 长度单位：Å；角度单位：度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// 检查长度为正、角度在 (0, 180) 内
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(QporeError::InvalidLattice(format!(
                    "length {} = {} must be positive",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(value > 0.0 && value < 180.0) {
                return Err(QporeError::InvalidLattice(format!(
                    "angle {} = {} must lie in (0, 180) degrees",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// 计算晶胞体积 (Å³)
    ///
    /// V = abc·sqrt(sin²α + sin²β + sin²γ + 2cosα·cosβ·cosγ − 2)
    pub fn volume(&self) -> f64 {
        let (alpha, beta, gamma) = (
            self.alpha.to_radians(),
            self.beta.to_radians(),
            self.gamma.to_radians(),
        );

        let radicand = alpha.sin().powi(2) + beta.sin().powi(2) + gamma.sin().powi(2)
            + 2.0 * alpha.cos() * beta.cos() * gamma.cos()
            - 2.0;

        self.a * self.b * self.c * radicand.sqrt()
    }
}

/// 骨架原子（笛卡尔坐标，Å）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkAtom {
    /// 种类标签，须在种类表中存在
    pub species: String,
    /// 笛卡尔坐标 [x, y, z]
    pub position: [f64; 3],
}

impl FrameworkAtom {
    pub fn new(species: impl Into<String>, position: [f64; 3]) -> Self {
        FrameworkAtom {
            species: species.into(),
            position,
        }
    }
}

/// 完整吸附体系：种类表 + 晶胞 + 骨架 + 探针
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdsorptionSystem {
    /// 体系名称（通常取输入文件名）
    pub name: String,

    /// 种类参数表
    pub species: SpeciesTable,

    /// 晶胞参数
    pub lattice: LatticeParameters,

    /// 骨架原子列表
    pub atoms: Vec<FrameworkAtom>,

    /// 探针种类标签
    pub probe: String,
}

impl AdsorptionSystem {
    pub fn new(
        name: impl Into<String>,
        species: SpeciesTable,
        lattice: LatticeParameters,
        atoms: Vec<FrameworkAtom>,
        probe: impl Into<String>,
    ) -> Self {
        AdsorptionSystem {
            name: name.into(),
            species,
            lattice,
            atoms,
            probe: probe.into(),
        }
    }

    /// 在任何网格计算之前完成的一次性检查
    pub fn validate(&self) -> Result<()> {
        self.lattice.validate()?;

        let volume = self.lattice.volume();
        if !(volume > 0.0) {
            return Err(QporeError::InvalidLattice(format!(
                "unit cell volume {} is not positive",
                volume
            )));
        }

        self.species.lookup(&self.probe, "PROBE")?;

        if self.atoms.is_empty() {
            return Err(QporeError::InvalidArgument(format!(
                "structure '{}' has no FRAMEWORK atoms",
                self.name
            )));
        }

        for (i, atom) in self.atoms.iter().enumerate() {
            self.species
                .lookup(&atom.species, &format!("FRAMEWORK atom #{}", i + 1))?;
        }

        if !(self.total_mass_amu()? > 0.0) {
            return Err(QporeError::InvalidArgument(format!(
                "structure '{}' has a non-positive unit cell mass",
                self.name
            )));
        }

        Ok(())
    }

    /// 骨架总质量 (amu)
    pub fn total_mass_amu(&self) -> Result<f64> {
        self.atoms.iter().try_fold(0.0, |acc, atom| {
            let species = self.species.lookup(&atom.species, "FRAMEWORK")?;
            Ok(acc + species.mass)
        })
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        self.composition()
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// 各种类的原子数
    pub fn composition(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.species.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
