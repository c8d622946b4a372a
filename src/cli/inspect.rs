//! # inspect 子命令 CLI 定义
//!
//! 解析并校验输入文件，打印体系概要。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Adsorption system input file
    pub input: PathBuf,
}
