//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure bindings for the catalog tool:
//! the message store and its SQLite backend, the operator console, the
//! external extractor, process capture, logging and i18n support.
//!
//! 此模块为目录工具提供基础设施绑定：
//! 消息存储及其 SQLite 后端、操作员控制台、外部提取器、进程捕获、日志和国际化支持。

pub mod command;
pub mod console;
pub mod extractor;
pub mod logging;
pub mod sqlite;
pub mod store;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
