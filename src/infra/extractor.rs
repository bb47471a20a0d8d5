//! # Extractor Binding Module / 提取器绑定模块
//!
//! Message extraction itself is performed by an external program that scans
//! the application's sources and writes canonical rows into the catalog. This
//! module defines the [`Extractor`] seam the dispatcher calls and
//! [`ExternalExtractor`], which runs the configured command line.
//!
//! 消息提取本身由外部程序完成，它扫描应用程序源代码并将规范行写入目录。
//! 此模块定义了分发器调用的 [`Extractor`] 接口，以及运行所配置命令行的
//! [`ExternalExtractor`]。

use colored::*;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::infra::command::spawn_and_capture;
use crate::infra::console::Console;
use crate::infra::t;

/// Environment variable carrying the catalog database path to the extractor.
pub const DATABASE_ENV: &str = "I18N_DATABASE";
/// Environment variable carrying the catalog table name to the extractor.
pub const CATALOG_ENV: &str = "I18N_CATALOG";

/// Non-fatal extraction outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractReport {
    Completed,
    /// No command is configured; nothing ran.
    NotConfigured,
}

/// Extraction failures. Every variant aborts an interactive session.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot parse extractor command `{0}`")]
    InvalidCommand(String),
    #[error("failed to start extractor `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("extractor `{command}` exited with {}", exit_code_label(*.code))]
    Failed { command: String, code: Option<i32> },
}

fn exit_code_label(code: Option<i32>) -> String {
    code.map(|c| format!("status {c}"))
        .unwrap_or_else(|| "a signal".to_string())
}

/// Populates the canonical catalog from application sources.
pub trait Extractor {
    fn extract(&mut self, console: &mut dyn Console) -> Result<ExtractReport, ExtractError>;
}

/// Runs an external extraction command and relays its output to the operator.
#[derive(Debug, Clone, Default)]
pub struct ExternalExtractor {
    command: Option<String>,
    working_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    /// Where the operator should configure the command; used in guidance text
    config_hint: String,
}

impl ExternalExtractor {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
            ..Self::default()
        }
    }

    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn config_hint(mut self, hint: impl Into<String>) -> Self {
        self.config_hint = hint.into();
        self
    }

    fn build_command(&self, command_line: &str) -> Result<tokio::process::Command, ExtractError> {
        // Only `~` is expanded here; `$VARS` are left for the child's own shell.
        let expanded = shellexpand::tilde(command_line).to_string();

        let parts = shlex::split(&expanded)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| ExtractError::InvalidCommand(command_line.to_string()))?;

        let mut cmd = tokio::process::Command::new(&parts[0]);
        cmd.args(&parts[1..]).kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        Ok(cmd)
    }
}

impl Extractor for ExternalExtractor {
    fn extract(&mut self, console: &mut dyn Console) -> Result<ExtractReport, ExtractError> {
        let Some(command_line) = self.command.clone() else {
            console.err(&t!("extract_not_configured", path = &self.config_hint));
            return Ok(ExtractReport::NotConfigured);
        };

        let cmd = self.build_command(&command_line)?;
        console.out(&t!("extract_running", command = &command_line).blue().to_string());
        debug!("Spawning extractor: {command_line}");

        // The session is synchronous; a private runtime drives the child to completion.
        let spawn_error = |source: io::Error| ExtractError::Spawn {
            command: command_line.clone(),
            source,
        };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(spawn_error)?;
        let captured = runtime.block_on(spawn_and_capture(cmd)).map_err(spawn_error)?;

        for line in captured.output.lines() {
            console.out(line);
        }

        if !captured.status.success() {
            return Err(ExtractError::Failed {
                command: command_line,
                code: captured.status.code(),
            });
        }

        console.success(&t!("extract_finished"));
        Ok(ExtractReport::Completed)
    }
}
