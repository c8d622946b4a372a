//! # 数据模型模块
//!
//! 定义原子种类参数、晶胞参数和吸附体系数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`landscape/` 和 `commands/` 使用
//! - 子模块: species, structure

pub mod species;
pub mod structure;

pub use species::{AtomSpecies, SpeciesTable};
pub use structure::{AdsorptionSystem, FrameworkAtom, LatticeParameters};
