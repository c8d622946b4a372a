//! # 晶胞几何
//!
//! 分数坐标 → 笛卡尔坐标变换矩阵，以及 27 个周期性镜像偏移向量。
//!
//! ## 变换矩阵（三斜晶系标准约定，a 沿 x 轴）
//! ```text
//! α* = acos((cosβ·cosγ − cosα) / (sinβ·sinγ))
//! A  = | a   b·cosγ   c·cosβ          |
//!      | 0   b·sinγ  −c·sinβ·cosα*    |
//!      | 0   0        c·sinβ·sinα*    |
//! ```
//!
//! ## 依赖关系
//! - 被 `landscape/grid.rs` 调用
//! - 使用 `models/structure.rs` 的 LatticeParameters

use crate::error::{QporeError, Result};
use crate::models::LatticeParameters;

/// 分数 → 笛卡尔变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransform {
    /// 3x3 矩阵，列向量为晶格向量 a, b, c
    pub matrix: [[f64; 3]; 3],
}

impl CellTransform {
    /// 从晶胞参数构建变换矩阵
    pub fn from_parameters(lattice: &LatticeParameters) -> Result<Self> {
        let alpha = lattice.alpha.to_radians();
        let beta = lattice.beta.to_radians();
        let gamma = lattice.gamma.to_radians();

        let argument = (beta.cos() * gamma.cos() - alpha.cos()) / (beta.sin() * gamma.sin());
        if !(-1.0..=1.0).contains(&argument) {
            return Err(QporeError::DegenerateLattice { argument });
        }
        let alpha_star = argument.acos();

        let (a, b, c) = (lattice.a, lattice.b, lattice.c);

        Ok(CellTransform {
            matrix: [
                [a, b * gamma.cos(), c * beta.cos()],
                [0.0, b * gamma.sin(), -c * beta.sin() * alpha_star.cos()],
                [0.0, 0.0, c * beta.sin() * alpha_star.sin()],
            ],
        })
    }

    /// 分数坐标转笛卡尔坐标
    #[inline]
    pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        [
            m[0][0] * frac[0] + m[0][1] * frac[1] + m[0][2] * frac[2],
            m[1][0] * frac[0] + m[1][1] * frac[1] + m[1][2] * frac[2],
            m[2][0] * frac[0] + m[2][1] * frac[1] + m[2][2] * frac[2],
        ]
    }

    /// {-1, 0, 1}³ 的全部 27 个镜像偏移（含零向量）
    pub fn image_offsets(&self) -> Vec<[f64; 3]> {
        let mut offsets = Vec::with_capacity(27);
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    offsets.push(self.to_cartesian([i as f64, j as f64, k as f64]));
                }
            }
        }
        offsets
    }
}

/// 两点间欧氏距离
#[inline]
pub fn distance(p: &[f64; 3], q: &[f64; 3]) -> f64 {
    let dx = p[0] - q[0];
    let dy = p[1] - q[1];
    let dz = p[2] - q[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
