//! # 解析器模块
//!
//! 提供吸附体系输入文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: input

pub mod input;

use crate::error::{QporeError, Result};
use crate::models::AdsorptionSystem;
use std::path::Path;

/// 解析并校验输入文件
pub fn load_system(path: &Path) -> Result<AdsorptionSystem> {
    if !path.is_file() {
        return Err(QporeError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let system = input::parse_input_file(path)?;
    system.validate()?;
    Ok(system)
}
