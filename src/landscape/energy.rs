//! # 成对相互作用能
//!
//! Lennard-Jones 12-6 势与 Coulomb 项，以及 Lorentz-Berthelot 混合规则。
//! 返回值单位均为 J（每对粒子）；ε 以 K 为单位，乘 k_B 换算。
//!
//! ## 依赖关系
//! - 被 `landscape/grid.rs` 调用
//! - 使用 `landscape/constants.rs`
//! - 使用 `models/species.rs`

use crate::landscape::constants::{
    BOLTZMANN_CONSTANT, COULOMB_CONSTANT, ELEMENTARY_CHARGE, INV_ANGSTROM_TO_INV_METER,
};
use crate::models::AtomSpecies;

/// Lennard-Jones 能量 4εk_B[(σ/r)¹² − (σ/r)⁶]
///
/// `distance` 必须为正，由调用方的截断策略保证。
#[inline]
pub fn lennard_jones_energy(sigma: f64, epsilon: f64, distance: f64) -> f64 {
    let sr6 = (sigma / distance).powi(6);
    4.0 * epsilon * BOLTZMANN_CONSTANT * (sr6 * sr6 - sr6)
}

/// Coulomb 能量 e²·q₁q₂·k_C·1e10 / r（r 以 Å 计）
#[inline]
pub fn coulomb_energy(charge_product: f64, distance: f64) -> f64 {
    ELEMENTARY_CHARGE * ELEMENTARY_CHARGE * charge_product * COULOMB_CONSTANT
        * INV_ANGSTROM_TO_INV_METER
        / distance
}

/// 探针与骨架原子之间的混合参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairParameters {
    /// σ_mix = (σ₁ + σ₂)/2
    pub sigma: f64,
    /// ε_mix = sqrt(ε₁ε₂)
    pub epsilon: f64,
    /// q₁·q₂
    pub charge_product: f64,
}

impl PairParameters {
    /// Lorentz-Berthelot 混合
    pub fn mix(first: &AtomSpecies, second: &AtomSpecies) -> Self {
        PairParameters {
            sigma: 0.5 * (first.sigma + second.sigma),
            epsilon: (first.epsilon * second.epsilon).sqrt(),
            charge_product: first.charge * second.charge,
        }
    }

    /// 单个镜像对的总能量
    #[inline]
    pub fn energy(&self, distance: f64) -> f64 {
        lennard_jones_energy(self.sigma, self.epsilon, distance)
            + coulomb_energy(self.charge_product, distance)
    }
}
