//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which seeds one language
//! directly from the canonical catalog without entering the menu.
//!
//! 此模块实现 `init` 命令，无需进入菜单即可直接从规范目录初始化一种语言。

use anyhow::Result;
use std::process::ExitCode;

use super::Context;
use crate::core::initializer::LanguageInitializer;
use crate::core::models::LanguageCode;
use crate::infra::console::{Console, TerminalConsole};
use crate::infra::t;
use crate::reporting::report_init_result;

/// Executes the init command.
///
/// # Arguments
/// * `context` - Resolved configuration and database path
/// * `language` - Target language code; prompted for when absent
/// * `model` - Catalog/model name overriding the configured one
///
/// # Returns
/// `ExitCode::FAILURE` when the language code is invalid or nothing could be
/// created; errors opening the database propagate.
pub fn execute(context: &Context, language: Option<String>, model: Option<String>) -> Result<ExitCode> {
    let mut console = TerminalConsole::new();
    let language = match language {
        Some(language) => language,
        None => console.ask(&t!("init_language_prompt"))?,
    };

    // Reject a bad code before the database is opened.
    if let Err(e) = LanguageCode::parse(&language) {
        report_init_result(&mut console, &language, &Err(e));
        return Ok(ExitCode::FAILURE);
    }

    let catalog = context.config.catalog_name(model.as_deref()).to_string();
    let store = context.open_store(&catalog)?;
    let mut initializer = LanguageInitializer::new(store);
    let result = initializer.initialize(&language, Some(&catalog));
    report_init_result(&mut console, &language, &result);

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
