//! # Interactive Session Module / 交互式会话模块
//!
//! Opens the catalog, wires the standard dispatcher and runs the menu loop
//! until the operator quits or a sub-operation fails fatally.
//!
//! 打开目录，装配标准分发器并运行菜单循环，直到操作员退出或子操作发生致命失败。

use anyhow::Result;
use std::process::ExitCode;
use tracing::info;

use super::Context;
use crate::core::dispatcher::CommandDispatcher;
use crate::core::initializer::LanguageInitializer;
use crate::infra::console::{Console, TerminalConsole};
use crate::infra::t;

pub fn execute(context: &Context, help_text: String) -> Result<ExitCode> {
    let mut console = TerminalConsole::new();
    let catalog = context.config.catalog_name(None).to_string();

    let store = context.open_store(&catalog)?;
    info!("Session started on {}", context.database.display());
    let mut initializer = LanguageInitializer::new(store);
    let mut extractor = context.extractor(&catalog);

    let mut dispatcher =
        CommandDispatcher::standard(&mut extractor, &mut initializer, Some(catalog), help_text);

    match dispatcher.run(&mut console) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            console.err(&t!("session_aborted", cause = e));
            Ok(ExitCode::FAILURE)
        }
    }
}
