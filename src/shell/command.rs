//! Host command execution.
//!
//! Probes query host tools directly (program plus argument vector), never
//! through an interpolating shell, so tool names and flags reach the process
//! exactly as registered.

use crate::error::{InstallError, Result};
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// How often a command with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long output is still collected after a timed-out child is killed.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Result of executing a host command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Kill the child and report failure after this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Run `program` with `args`, capturing both output streams.
///
/// Returns `Err(CommandFailed)` only when the process cannot be spawned.
/// A process that runs and exits non-zero yields `Ok` with `success == false`.
///
/// On timeout only the direct child is killed. Output still held open by a
/// grandchild is abandoned after [`DRAIN_GRACE`].
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let cmdline = display_command(program, args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| InstallError::CommandFailed {
            command: cmdline.clone(),
            code: None,
        })?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain both pipes on their own threads so a chatty child cannot block on a full pipe.
    let (stdout_tx, stdout_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(out) = stdout.as_mut() {
            let _ = out.read_to_end(&mut buf);
        }
        let _ = stdout_tx.send(buf);
    });
    let (stderr_tx, stderr_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(err) = stderr.as_mut() {
            let _ = err.read_to_end(&mut buf);
        }
        let _ = stderr_tx.send(buf);
    });

    let status = match options.timeout {
        None => Some(child.wait()?),
        Some(limit) => loop {
            if let Some(status) = child.try_wait()? {
                break Some(status);
            }
            if start.elapsed() >= limit {
                tracing::debug!("Command timed out after {:?}: {}", limit, cmdline);
                let _ = child.kill();
                let _ = child.wait();
                break None;
            }
            thread::sleep(POLL_INTERVAL);
        },
    };

    let timed_out = status.is_none();
    let stdout = decode_output(&collect_output(&stdout_rx, timed_out));
    let stderr = decode_output(&collect_output(&stderr_rx, timed_out));
    let duration = start.elapsed();

    match status {
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
        None => Ok(CommandResult::failure(None, stdout, stderr, duration)),
    }
}

/// Wait for a reader thread's buffer, giving up after [`DRAIN_GRACE`] when timed out.
fn collect_output(rx: &mpsc::Receiver<Vec<u8>>, timed_out: bool) -> Vec<u8> {
    if timed_out {
        rx.recv_timeout(DRAIN_GRACE).unwrap_or_default()
    } else {
        rx.recv().unwrap_or_default()
    }
}

/// Decode captured process output.
///
/// Some Windows tools (notably the WSL launcher) write UTF-16LE even when
/// redirected. Interleaved NUL bytes are the tell; everything else is read
/// as lossy UTF-8.
pub fn decode_output(bytes: &[u8]) -> String {
    if looks_like_utf16le(bytes) {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
            .trim_start_matches('\u{feff}')
            .to_string()
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}

fn looks_like_utf16le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 {
        return false;
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        return true;
    }
    let odd_nuls = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    odd_nuls * 2 >= bytes.len() / 2
}

/// Render a program and its arguments for logs and errors.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
