//! # 原子种类参数表
//!
//! 定义 Lennard-Jones/电荷/质量参数和按标签索引的种类表。
//!
//! ## 依赖关系
//! - 被 `parsers/input.rs` 构建
//! - 被 `landscape/` 查询混合参数
//! - 使用 `error.rs`

use crate::error::{QporeError, Result};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个原子种类的力场参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomSpecies {
    /// 势阱深度 ε（K，计算时乘以 k_B）
    pub epsilon: f64,
    /// 尺寸参数 σ（Å）
    pub sigma: f64,
    /// 部分电荷（e）
    pub charge: f64,
    /// 原子质量（amu）
    pub mass: f64,
}

impl AtomSpecies {
    pub fn new(epsilon: f64, sigma: f64, charge: f64, mass: f64) -> Self {
        AtomSpecies {
            epsilon,
            sigma,
            charge,
            mass,
        }
    }
}

/// 种类表，标签唯一
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesTable {
    entries: BTreeMap<String, AtomSpecies>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入新种类；标签已存在时返回 false 且不覆盖
    pub fn insert(&mut self, label: impl Into<String>, species: AtomSpecies) -> bool {
        let label = label.into();
        if self.entries.contains_key(&label) {
            return false;
        }
        self.entries.insert(label, species);
        true
    }

    /// 按标签查找，`context` 用于错误信息
    pub fn lookup(&self, label: &str, context: &str) -> Result<&AtomSpecies> {
        self.entries
            .get(label)
            .ok_or_else(|| QporeError::UnknownSpecies {
                species: label.to_string(),
                context: context.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 按标签字母序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AtomSpecies)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicate_label() {
        let mut table = SpeciesTable::new();
        assert!(table.insert("O", AtomSpecies::new(52.0, 3.03, -0.4, 16.0)));
        assert!(!table.insert("O", AtomSpecies::new(1.0, 1.0, 0.0, 1.0)));

        // 原值保留
        let o = table.lookup("O", "test").unwrap();
        assert!((o.epsilon - 52.0).abs() < 1e-12);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_missing_species() {
        let table = SpeciesTable::new();
        let err = table.lookup("Xe", "probe").unwrap_err();
        match err {
            QporeError::UnknownSpecies { species, context } => {
                assert_eq!(species, "Xe");
                assert_eq!(context, "probe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut table = SpeciesTable::new();
        table.insert("Si", AtomSpecies::new(22.0, 2.3, 0.8, 28.09));
        table.insert("Ar", AtomSpecies::new(119.8, 3.4, 0.0, 39.95));
        table.insert("O", AtomSpecies::new(52.0, 3.03, -0.4, 16.0));

        let labels: Vec<&str> = table.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Ar", "O", "Si"]);
    }
}
