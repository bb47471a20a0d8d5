//! # Logging Module / 日志模块
//!
//! Diagnostic logging goes to stderr through `tracing`. Operator-facing text
//! is written by the console, never through the logger.
//!
//! 诊断日志通过 `tracing` 输出到 stderr。面向操作员的文本由控制台输出，
//! 不经过日志系统。

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";
/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "warn,i18n_catalog=debug";

/// Installs the global subscriber. `--verbose` overrides `RUST_LOG`.
/// Calling it more than once is harmless.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    // Fails only when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
