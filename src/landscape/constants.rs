//! # 物理常数
//!
//! 从 `physical_constants` (CODATA) 导出计算中用到的常数。
//!
//! ## 依赖关系
//! - 被 `landscape/energy.rs`, `landscape/grid.rs`, `landscape/curve.rs` 使用

use std::f64::consts::PI;

pub use physical_constants::{
    ATOMIC_MASS_CONSTANT, AVOGADRO_CONSTANT, BOLTZMANN_CONSTANT, ELEMENTARY_CHARGE,
};

/// Coulomb 常数 1/(4πε₀)，单位 N·m²/C²
pub const COULOMB_CONSTANT: f64 =
    1.0 / (4.0 * PI * physical_constants::VACUUM_ELECTRIC_PERMITTIVITY);

/// 1/Å → 1/m
pub const INV_ANGSTROM_TO_INV_METER: f64 = 1.0e10;

/// J/粒子 → kJ/mol
pub const JOULE_TO_KJ_PER_MOL: f64 = AVOGADRO_CONSTANT * 1.0e-3;

/// Å³ → mL (cm³)
pub const CUBIC_ANGSTROM_TO_ML: f64 = 1.0e-24;

/// amu → g
pub const AMU_TO_GRAM: f64 = ATOMIC_MASS_CONSTANT * 1.0e3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_constants() {
        assert!((COULOMB_CONSTANT - 8.987_551_8e9).abs() / 8.987_551_8e9 < 1e-6);
        assert!((JOULE_TO_KJ_PER_MOL - 6.022_140_76e20).abs() / 6.022e20 < 1e-6);
        assert!((AMU_TO_GRAM - 1.660_539e-24).abs() / 1.66e-24 < 1e-5);
    }
}
