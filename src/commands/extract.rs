//! # Extract Command Module / 提取命令模块
//!
//! Runs the configured extractor once, outside the interactive menu.
//!
//! 在交互式菜单之外运行一次已配置的提取器。

use anyhow::Result;
use std::process::ExitCode;

use super::Context;
use crate::infra::console::{Console, TerminalConsole};
use crate::infra::extractor::Extractor;
use crate::infra::t;

pub fn execute(context: &Context) -> Result<ExitCode> {
    let mut console = TerminalConsole::new();
    let catalog = context.config.catalog_name(None);
    let mut extractor = context.extractor(catalog);

    match extractor.extract(&mut console) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            console.err(&t!("extract_failed", cause = e));
            Ok(ExitCode::FAILURE)
        }
    }
}
