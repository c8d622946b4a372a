//! # 吸附体系输入文件解析器
//!
//! 解析以关键字开头、空白分隔的纯文本输入格式。
//!
//! ## 输入格式说明
//! ```text
//! ATOMPROP  <species> <epsilon> <sigma> <charge> <mass>
//! FRAMEPROP <a> <b> <c> <alpha> <beta> <gamma>
//! FRAMEWORK <species> <x> <y> <z>      (可重复)
//! PROBE     <species>
//! ```
//! 记录顺序无关；空行及未知关键字开头的行被忽略。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/` 数据模型

use crate::error::{QporeError, Result};
use crate::models::{AdsorptionSystem, AtomSpecies, FrameworkAtom, LatticeParameters, SpeciesTable};
use std::fs;
use std::path::Path;

/// 解析输入文件
pub fn parse_input_file(path: &Path) -> Result<AdsorptionSystem> {
    let content = fs::read_to_string(path).map_err(|e| QporeError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_input_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
        &path.display().to_string(),
    )
}

/// 从字符串内容解析，`source` 仅用于错误信息
pub fn parse_input_content(content: &str, name: &str, source: &str) -> Result<AdsorptionSystem> {
    let mut species = SpeciesTable::new();
    let mut lattice: Option<LatticeParameters> = None;
    let mut atoms: Vec<FrameworkAtom> = Vec::new();
    let mut probe: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();

        let Some((&keyword, args)) = fields.split_first() else {
            continue;
        };

        let record = Record {
            source,
            line_no,
            text: raw.trim(),
            args,
        };

        match keyword {
            "ATOMPROP" => {
                let label = record.label(0)?;
                let values = record.numbers(1, 4)?;
                let (epsilon, sigma, mass) = (values[0], values[1], values[3]);
                if epsilon < 0.0 {
                    return Err(record.error(format!("epsilon must be >= 0, got {}", epsilon)));
                }
                if sigma <= 0.0 {
                    return Err(record.error(format!("sigma must be > 0, got {}", sigma)));
                }
                if mass <= 0.0 {
                    return Err(record.error(format!("mass must be > 0, got {}", mass)));
                }
                let entry = AtomSpecies::new(values[0], values[1], values[2], values[3]);
                if !species.insert(label, entry) {
                    return Err(QporeError::DuplicateRecord {
                        record: format!("ATOMPROP '{}'", label),
                        path: source.to_string(),
                        line: line_no,
                    });
                }
            }
            "FRAMEPROP" => {
                if lattice.is_some() {
                    return Err(QporeError::DuplicateRecord {
                        record: "FRAMEPROP".to_string(),
                        path: source.to_string(),
                        line: line_no,
                    });
                }
                let v = record.numbers(0, 6)?;
                lattice = Some(LatticeParameters::new(v[0], v[1], v[2], v[3], v[4], v[5]));
            }
            "FRAMEWORK" => {
                let label = record.label(0)?;
                let v = record.numbers(1, 3)?;
                atoms.push(FrameworkAtom::new(label, [v[0], v[1], v[2]]));
            }
            "PROBE" => {
                if probe.is_some() {
                    return Err(QporeError::DuplicateRecord {
                        record: "PROBE".to_string(),
                        path: source.to_string(),
                        line: line_no,
                    });
                }
                probe = Some(record.label(0)?.to_string());
            }
            _ => {}
        }
    }

    let lattice = lattice.ok_or_else(|| QporeError::MissingRecord {
        record: "FRAMEPROP".to_string(),
        path: source.to_string(),
    })?;
    let probe = probe.ok_or_else(|| QporeError::MissingRecord {
        record: "PROBE".to_string(),
        path: source.to_string(),
    })?;

    Ok(AdsorptionSystem::new(name, species, lattice, atoms, probe))
}

/// 单行记录（关键字之后的字段）
struct Record<'a> {
    source: &'a str,
    line_no: usize,
    text: &'a str,
    args: &'a [&'a str],
}

impl<'a> Record<'a> {
    fn error(&self, reason: String) -> QporeError {
        QporeError::InputFormat {
            path: self.source.to_string(),
            line: self.line_no,
            reason: format!("{} (`{}`)", reason, self.text),
        }
    }

    fn label(&self, index: usize) -> Result<&'a str> {
        self.args
            .get(index)
            .copied()
            .ok_or_else(|| self.error("missing species label".to_string()))
    }

    /// 读取从 `start` 开始的 `count` 个有限浮点数；多余字段忽略
    fn numbers(&self, start: usize, count: usize) -> Result<Vec<f64>> {
        if self.args.len() < start + count {
            return Err(self.error(format!(
                "expected {} fields, found {}",
                start + count,
                self.args.len()
            )));
        }

        self.args[start..start + count]
            .iter()
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| self.error(format!("invalid number '{}'", token)))
            })
            .collect()
    }
}
