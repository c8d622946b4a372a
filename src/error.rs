//! # 统一错误处理模块
//!
//! 定义 Qpore 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Qpore 统一错误类型
#[derive(Error, Debug)]
pub enum QporeError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Output directory already exists: {path} (use --on-exists overwrite|suffix)")]
    OutputExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 输入解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed input in {path}, line {line}: {reason}")]
    InputFormat {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Missing {record} record in {path}")]
    MissingRecord { record: String, path: String },

    #[error("Duplicate {record} record in {path}, line {line}")]
    DuplicateRecord {
        record: String,
        path: String,
        line: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 物理模型错误
    // ─────────────────────────────────────────────────────────────
    #[error("Undefined species '{species}' referenced by {context}")]
    UnknownSpecies { species: String, context: String },

    #[error("Invalid lattice: {0}")]
    InvalidLattice(String),

    #[error("Degenerate lattice: arccos argument {argument:.6} is outside [-1, 1]")]
    DegenerateLattice { argument: f64 },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plotting failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, QporeError>;
