//! # Command Runner
//!
//! Executes context commands through a POSIX shell.
//!
//! ## Overview
//!
//! Two modes mirror the two store operations:
//!
//! | Mode | Function | Streams |
//! |------|----------|---------|
//! | Activation | [`run_interactive`] | inherited stdin/stdout/stderr |
//! | Job run | [`run_captured`] | stdout/stderr captured separately |
//!
//! The command string is variable-expanded and handed to `sh -c` as a single
//! shell-interpreted line. No validation or escaping is applied beyond what
//! the shell itself performs; callers control their own variable values.
//!
//! ## Key Design Decisions
//!
//! A process that could not be started at all ([`RunStatus::LaunchFailed`])
//! is kept distinct from one that ran and exited non-zero
//! ([`RunStatus::Exited`]); the two are never merged. When the platform does
//! not expose an exit status (e.g. the child was killed by a signal), the
//! recorded code defaults to 0 but success is still derived from the wait
//! status, so missing information is never reported as success.

use crate::exec::expand_variables;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::process::{Command, Stdio};
use thiserror::Error;

const REPORT_SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Errors from starting a subprocess.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch shell: {0}")]
    Launch(#[source] std::io::Error),
}

/// How a captured run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The subprocess ran to completion. `code` is the real exit status when
    /// available, 0 otherwise; `success` comes from the wait status itself.
    Exited { code: i32, success: bool },
    /// The subprocess could not be started.
    LaunchFailed(String),
}

/// Result of a captured run: the expanded command line, how it ended, and
/// the formatted report shown to the user and recorded on the context.
#[derive(Debug, Clone)]
pub struct CommandReport {
    pub command: String,
    pub status: RunStatus,
    pub report: String,
}

impl CommandReport {
    pub fn success(&self) -> bool {
        matches!(self.status, RunStatus::Exited { success: true, .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Exited { code, .. } => code,
            RunStatus::LaunchFailed(_) => 0,
        }
    }
}

/// Run a command with the terminal attached (interactive passthrough).
///
/// Used for context activation so the command can prompt, page, or draw.
/// Returns the exit code; 0 when the platform does not expose one.
pub fn run_interactive(
    command: &str,
    variables: &BTreeMap<String, String>,
) -> Result<i32, ExecError> {
    let expanded = expand_variables(command, variables);
    let status = Command::new("sh")
        .arg("-c")
        .arg(&expanded)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(ExecError::Launch)?;
    Ok(status.code().unwrap_or(0))
}

/// Run a command with stdout and stderr captured into the formatted report.
///
/// Blocks until the subprocess terminates. Launch failure is folded into the
/// returned [`CommandReport`] rather than escalated: job execution records
/// failures, it does not abort on them.
pub fn run_captured(command: &str, variables: &BTreeMap<String, String>) -> CommandReport {
    run_captured_with_shell("sh", command, variables)
}

fn run_captured_with_shell(
    shell: &str,
    command: &str,
    variables: &BTreeMap<String, String>,
) -> CommandReport {
    let expanded = expand_variables(command, variables);

    let output = match Command::new(shell).arg("-c").arg(&expanded).output() {
        Ok(output) => output,
        Err(err) => {
            let message = err.to_string();
            let report = format_launch_failure(&expanded, &message);
            return CommandReport {
                command: expanded,
                status: RunStatus::LaunchFailed(message),
                report,
            };
        }
    };

    let code = output.status.code().unwrap_or(0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let report = format_report(&expanded, code, &stdout, &stderr);

    CommandReport {
        command: expanded,
        status: RunStatus::Exited {
            code,
            success: output.status.success(),
        },
        report,
    }
}

fn report_header(command: &str, exit_code: i32) -> String {
    format!("Command: {command}\nExit Code: {exit_code}\n{REPORT_SEPARATOR}\n")
}

/// Build the combined report: command line, exit code, separator, then the
/// STDOUT and STDERR sections (each newline-terminated, separated by a blank
/// line) or a `(no output)` marker when both streams are empty.
fn format_report(command: &str, exit_code: i32, stdout: &str, stderr: &str) -> String {
    let mut report = report_header(command, exit_code);

    if !stdout.is_empty() {
        report.push_str("STDOUT:\n");
        report.push_str(stdout);
        if !stdout.ends_with('\n') {
            report.push('\n');
        }
    }

    if !stderr.is_empty() {
        if !stdout.is_empty() {
            report.push('\n');
        }
        report.push_str("STDERR:\n");
        report.push_str(stderr);
        if !stderr.ends_with('\n') {
            report.push('\n');
        }
    }

    if stdout.is_empty() && stderr.is_empty() {
        report.push_str("(no output)");
    }

    report
}

fn format_launch_failure(command: &str, message: &str) -> String {
    let mut report = report_header(command, 0);
    let _ = write!(report, "(launch failed: {message})");
    report
}
