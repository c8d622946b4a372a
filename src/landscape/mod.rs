//! # 势能地形计算模块
//!
//! 计算探针在多孔骨架中的相互作用势能网格，并导出特性曲线。
//!
//! ## 子模块
//! - `constants`: 物理常数
//! - `energy`: 成对相互作用能与混合规则
//! - `lattice`: 晶胞几何与周期性镜像
//! - `grid`: 势能网格计算
//! - `curve`: 特性曲线构建
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `models/`

pub mod constants;
pub mod curve;
pub mod energy;
pub mod export;
pub mod grid;
pub mod lattice;
pub mod plot;

pub use curve::CurveBuilder;
pub use grid::GridEvaluator;
