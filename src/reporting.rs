//! # Reporting Module / 报告模块
//!
//! This module handles operator-facing output: the interactive menu and the
//! outcome of sub-operations, printed with internationalization support.
//!
//! 此模块处理面向操作员的输出：交互式菜单和子操作的结果，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_menu, report_init_result};
