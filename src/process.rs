//! Bounded external process execution
//!
//! Thin wrappers over `tokio::process::Command` that turn spawn failures,
//! non-zero exits and timeouts into `SetupError` values. No process state
//! outlives a call: children are killed on drop.

use crate::error::{SetupError, SetupResult};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Render a command as a shell-like string for logs and errors
pub fn describe(cmd: &Command) -> String {
    let std = cmd.as_std();
    let mut parts = vec![std.get_program().to_string_lossy().into_owned()];
    parts.extend(std.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command to completion, streaming all of its output to our stderr.
///
/// Our stdout stays reserved for the final result.
pub async fn run_visible(mut cmd: Command) -> SetupResult<ExitStatus> {
    let command = describe(&cmd);
    debug!("Executing: {}", command);

    cmd.stdin(Stdio::null())
        .stdout(std::io::stderr())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| SetupError::command_failed(command, e))
}

/// Run a command silently and report whether it exited successfully
pub async fn run_quiet(mut cmd: Command) -> SetupResult<bool> {
    let command = describe(&cmd);
    debug!("Executing quietly: {}", command);

    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| SetupError::command_failed(command, e))?;

    Ok(status.success())
}

/// Return the first non-empty stdout line a command prints within `limit`.
///
/// The child is killed as soon as a line arrives or the limit expires.
/// Exit status is ignored: tools like `find` exit non-zero on unreadable
/// directories while still printing valid results. `Ok(None)` means the
/// command finished without printing anything.
pub async fn first_line_within(mut cmd: Command, limit: Duration) -> SetupResult<Option<String>> {
    let command = describe(&cmd);
    debug!("Executing with {}s limit: {}", limit.as_secs(), command);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SetupError::command_failed(command.clone(), e))?;

    let stdout = child.stdout.take().ok_or_else(|| {
        SetupError::command_failed(command.clone(), std::io::ErrorKind::BrokenPipe.into())
    })?;

    let read_first = async {
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
        Ok::<_, std::io::Error>(None)
    };

    let result = match tokio::time::timeout(limit, read_first).await {
        Ok(Ok(line)) => Ok(line),
        Ok(Err(e)) => Err(SetupError::io(format!("reading output of {}", command), e)),
        Err(_) => Err(SetupError::CommandTimeout {
            command,
            after: limit,
        }),
    };

    // Either we have what we need or we gave up; don't leave the child running
    let _ = child.start_kill();
    let _ = child.wait().await;

    result
}
