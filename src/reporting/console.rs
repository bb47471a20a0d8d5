//! # Console Reporting Module / 控制台报告模块
//!
//! Prints the session menu and the outcome of a language initialization to
//! the operator's console, with internationalization support.
//!
//! 向操作员控制台打印会话菜单和语言初始化的结果，支持国际化。

use crate::core::dispatcher::MenuAction;
use crate::core::initializer::{InitError, InitReport};
use crate::infra::console::Console;
use crate::infra::t;

/// Prints the banner and one line per menu action.
///
/// ```text
/// I18n Command
/// ---------------------------------------------------------------
/// [E]xtract translation messages from sources
/// [I]nitialize a language
/// [H]elp
/// [Q]uit
/// ```
pub fn print_menu(console: &mut dyn Console) {
    console.out(&t!("menu_banner"));
    console.hr();
    for action in MenuAction::ALL {
        console.out(&action.label());
    }
}

/// Reports an initialization outcome. Successes go to the output stream,
/// failures to the error stream.
///
/// 报告初始化结果。成功信息写入输出流，失败信息写入错误流。
pub fn report_init_result(
    console: &mut dyn Console,
    language: &str,
    result: &Result<InitReport, InitError>,
) {
    match result {
        Ok(report) => console.success(&t!(
            "init_created",
            count = report.created,
            language = report.language
        )),
        Err(InitError::InvalidLanguage(_)) => console.err(&t!("init_invalid_language")),
        Err(InitError::InvalidCatalog(name)) => {
            console.err(&t!("init_invalid_catalog", name = name))
        }
        Err(InitError::Persistence { source, .. }) => {
            console.err(&t!("init_failed", language = language.trim()));
            console.err(&t!("init_failure_cause", cause = source));
        }
    }
}
