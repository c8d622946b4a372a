//! # 输出目录准备
//!
//! 按 `--on-exists` 策略创建输出目录。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `cli/run.rs` 的 OnExists

use crate::cli::run::OnExists;
use crate::error::{QporeError, Result};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 创建输出目录，返回实际使用的路径
///
/// `fail` 和 `suffix` 用 `create_dir` 原子地占用目录，并行调用不会拿到同一路径。
pub fn prepare_output_dir(base: &Path, policy: OnExists) -> Result<PathBuf> {
    if let Some(parent) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    match policy {
        OnExists::Fail => {
            if create_new_dir(base)? {
                Ok(base.to_path_buf())
            } else {
                Err(QporeError::OutputExists {
                    path: base.display().to_string(),
                })
            }
        }
        OnExists::Overwrite => {
            fs::create_dir_all(base).map_err(|e| write_error(base, e))?;
            Ok(base.to_path_buf())
        }
        OnExists::Suffix => {
            let name = base
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "output".to_string());

            let mut n = 0usize;
            loop {
                let candidate = if n == 0 {
                    base.to_path_buf()
                } else {
                    base.with_file_name(format!("{}_{}", name, n))
                };
                if create_new_dir(&candidate)? {
                    return Ok(candidate);
                }
                n += 1;
            }
        }
    }
}

/// 新建目录；目录（或同名文件）已存在时返回 `false`
fn create_new_dir(path: &Path) -> Result<bool> {
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(write_error(path, e)),
    }
}

fn write_error(path: &Path, source: std::io::Error) -> QporeError {
    QporeError::FileWriteError {
        path: path.display().to_string(),
        source,
    }
}
