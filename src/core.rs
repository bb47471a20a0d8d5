//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the catalog tool:
//! data models, configuration, the language initializer and the
//! interactive command dispatcher.
//!
//! 此模块包含目录工具的核心功能：
//! 数据模型、配置、语言初始化器和交互式命令分发器。

pub mod config;
pub mod dispatcher;
pub mod initializer;
pub mod models;

// Re-exports
pub use config::AppConfig;
pub use dispatcher::CommandDispatcher;
pub use initializer::{InitError, InitReport, LanguageInitializer};
pub use models::{CanonicalMessage, CatalogName, LanguageCode, Message};
