//! # Command Capture Module / 命令捕获模块
//!
//! Spawns an external program and collects its stdout and stderr into one
//! transcript. Both streams are drained concurrently so a chatty child cannot
//! block on a full pipe.
//!
//! 派生外部程序并将其 stdout 和 stderr 收集到一份记录中。
//! 两个流被并发读取，避免子进程因管道写满而阻塞。

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::Mutex;
use tracing::warn;

/// Exit status and merged output of a finished child process.
#[derive(Debug, Clone)]
pub struct Captured {
    pub status: ExitStatus,
    /// Lines from stdout and stderr in arrival order.
    pub output: String,
}

/// Runs `cmd` to completion, capturing its output.
///
/// # Errors / 错误
/// Returns the spawn or wait error; output gathered before a wait failure is lost.
pub async fn spawn_and_capture(mut cmd: tokio::process::Command) -> std::io::Result<Captured> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    let output = Arc::new(Mutex::new(String::new()));
    let stdout_handle = tokio::spawn(collect_lines(stdout, Arc::clone(&output)));
    let stderr_handle = tokio::spawn(collect_lines(stderr, Arc::clone(&output)));

    let status = child.wait().await?;

    // Wait for both readers so no trailing output is dropped.
    for handle in [stdout_handle, stderr_handle] {
        if let Err(e) = handle.await {
            warn!("Failed to join output reader: {e}");
        }
    }

    let output = output.lock().await.clone();
    Ok(Captured { status, output })
}

async fn collect_lines<R>(stream: R, sink: Arc<Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    // Lines are read as bytes so a non-UTF-8 line cannot stop the drain and
    // leave the child writing into a closed pipe.
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let mut sink = sink.lock().await;
                sink.push_str(line.trim_end_matches(['\n', '\r']));
                sink.push('\n');
            }
            Err(e) => {
                warn!("Failed to read child output: {e}");
                break;
            }
        }
    }
}
