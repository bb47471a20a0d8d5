//! # I18n Catalog Library / I18n 消息目录库
//!
//! This library provides the core functionality for the `i18n-catalog` tool,
//! which maintains a translation message catalog stored in a relational database.
//! An operator can trigger message extraction and seed a new language from the
//! canonical set of messages.
//!
//! 此库为 `i18n-catalog` 工具提供核心功能，
//! 该工具维护存储在关系数据库中的翻译消息目录。
//! 操作员可以触发消息提取，并从规范消息集初始化新语言。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration, the language initializer and the command dispatcher
//! - `infra` - Infrastructure bindings: message store, console, extractor, logging
//! - `reporting` - Operator-facing output for menus and outcomes
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置、语言初始化器和命令分发器
//! - `infra` - 基础设施绑定：消息存储、控制台、提取器、日志
//! - `reporting` - 面向操作员的菜单和结果输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::dispatcher;
pub use crate::core::initializer;
pub use crate::core::models;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the user interface language from a requested locale.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the language
/// code (e.g., "en" from "en-US"), and finally falls back to "en".
pub fn resolve_ui_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }

    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

/// Initializes the application's user interface language.
///
/// An explicit request wins; otherwise the system locale is detected with
/// `sys-locale`. The resolved locale is installed globally and returned.
pub fn init(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let lang = resolve_ui_locale(&locale);
    rust_i18n::set_locale(&lang);
    lang
}
