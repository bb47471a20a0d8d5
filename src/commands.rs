//! # Commands Module / 命令模块
//!
//! Entry points for each way the tool can be invoked: the interactive session,
//! direct language initialization and direct extraction. They share the
//! resolved [`Context`] and the helpers below.
//!
//! 工具各调用方式的入口：交互式会话、直接初始化语言和直接提取。
//! 它们共享已解析的 [`Context`] 和下面的辅助函数。

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::core::config::AppConfig;
use crate::core::models::CatalogName;
use crate::infra::extractor::{CATALOG_ENV, DATABASE_ENV, ExternalExtractor};
use crate::infra::sqlite::SqliteMessageStore;
use crate::infra::t;

pub mod extract;
pub mod init;
pub mod interactive;

/// Settings resolved from the command line and `Catalog.toml`.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub database: PathBuf,
}

impl Context {
    /// Opens the catalog database and creates `catalog` when it is missing.
    /// An unusable catalog name is left for the initializer to report.
    pub fn open_store(&self, catalog: &str) -> Result<SqliteMessageStore> {
        let store = SqliteMessageStore::open(&self.database)
            .with_context(|| t!("database_open_failed", path = self.database.display()))?;
        match CatalogName::parse(catalog) {
            Ok(name) => store
                .ensure_catalog(&name)
                .with_context(|| t!("catalog_create_failed", name = &name))?,
            Err(e) => debug!("Not creating catalog: {e}"),
        }
        Ok(store)
    }

    /// Builds the extractor from `[extract]`, exporting the catalog location to it.
    pub fn extractor(&self, catalog: &str) -> ExternalExtractor {
        let catalog = CatalogName::parse(catalog)
            .map(|name| name.to_string())
            .unwrap_or_else(|_| catalog.to_string());
        ExternalExtractor::new(self.config.extract.command.clone())
            .working_dir(self.config.extract.working_dir.clone())
            .env(DATABASE_ENV, self.database.display().to_string())
            .env(CATALOG_ENV, catalog)
            .config_hint(self.config_path.display().to_string())
    }
}
