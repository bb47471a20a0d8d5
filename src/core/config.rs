//! # Configuration Module / 配置模块
//!
//! Loads the optional `Catalog.toml` file. Every key is optional; values given
//! on the command line take precedence over the file, and the file takes
//! precedence over built-in defaults.
//!
//! 加载可选的 `Catalog.toml` 文件。所有键都是可选的；命令行参数优先于文件，
//! 文件优先于内置默认值。

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::DEFAULT_CATALOG;
use crate::infra::t;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "Catalog.toml";

/// Default SQLite database file holding the catalog.
pub const DEFAULT_DATABASE: &str = "i18n.sqlite";

/// Settings for the external extraction command.
/// 外部提取命令的设置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Command line to run, split with shell quoting rules.
    /// 要运行的命令行，按 shell 引号规则拆分。
    #[serde(default)]
    pub command: Option<String>,
    /// Directory the command runs in. Defaults to the current directory.
    /// 命令运行的目录，默认为当前目录。
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// The contents of `Catalog.toml`.
/// `Catalog.toml` 的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Language for the tool's own messages (e.g., "en", "zh-CN").
    /// 工具自身消息的语言（例如 "en"、"zh-CN"）。
    #[serde(default)]
    pub language: Option<String>,

    /// Path to the SQLite database. `~` and environment variables are expanded.
    /// SQLite 数据库路径。会展开 `~` 和环境变量。
    #[serde(default)]
    pub database: Option<String>,

    /// Catalog (table or model name) used by `init` when `--model` is absent.
    /// 当未提供 `--model` 时 `init` 使用的目录（表名或模型名）。
    #[serde(default)]
    pub catalog: Option<String>,

    #[serde(default)]
    pub extract: ExtractConfig,
}

impl AppConfig {
    /// Loads the configuration from `path`.
    ///
    /// When `explicit` is false a missing file yields the default configuration;
    /// a file named on the command line must exist.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() && !explicit {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| t!("config_read_failed", path = path.display()))?;
        Self::from_toml(&content).with_context(|| t!("config_parse_failed", path = path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolves the database path: the CLI value, then the file, then the default.
    pub fn database_path(&self, cli_value: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_value {
            return Ok(path.to_path_buf());
        }
        let raw = self.database.as_deref().unwrap_or(DEFAULT_DATABASE);
        let expanded = shellexpand::full(raw)
            .with_context(|| t!("config_expand_failed", value = raw))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Resolves the catalog name: the CLI value, then the file, then the default.
    pub fn catalog_name<'a>(&'a self, cli_value: Option<&'a str>) -> &'a str {
        cli_value
            .or(self.catalog.as_deref())
            .unwrap_or(DEFAULT_CATALOG)
    }
}
