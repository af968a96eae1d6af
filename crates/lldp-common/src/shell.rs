//! Shell command execution utilities for LLDP queries.
//!
//! This module provides shell command execution with proper quoting, a
//! bounded run time per command, and lookup of external binaries.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use lldp_common::shell::{self, LLDPTOOL_CMD, shellquote};
//!
//! let cmd = format!("{} get-tlv -n -i {} -V 5 2>/dev/null",
//!     LLDPTOOL_CMD, shellquote("eth0"));
//! let result = shell::exec(&cmd, Duration::from_secs(10)).await?;
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{LldpError, LldpResult};

/// Name of the Open-LLDP query tool.
pub const LLDPTOOL_CMD: &str = "lldptool";

/// Privilege escalation prefix; `lldptool` talks to `lldpad` over a root-owned socket.
pub const SUDO_CMD: &str = "sudo";

/// Watchdog that signals its whole process group when the limit expires.
/// `sudo` relays the SIGTERM to the privileged child.
pub const TIMEOUT_CMD: &str = "timeout";

/// Shell used to run command strings.
pub const SH_CMD: &str = "/bin/sh";

/// Directories searched after `PATH`. `lldptool` installs into sbin, which is
/// often missing from an unprivileged `PATH`.
pub const SBIN_DIRS: &[&str] = &["/usr/local/sbin", "/usr/sbin", "/sbin"];

/// Regex for characters that need escaping in shell double-quotes.
/// Matches: $, `, ", \, and newline
static SHELL_ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([$`"\\\n])"#).expect("Invalid regex pattern"));

/// Quotes a string for safe use in shell commands.
///
/// This function wraps the string in double quotes and escapes any
/// characters that have special meaning inside double quotes:
/// `$`, `` ` ``, `"`, `\` and newline.
///
/// # Example
///
/// ```
/// use lldp_common::shell::shellquote;
///
/// assert_eq!(shellquote("eth0"), "\"eth0\"");
/// assert_eq!(shellquote("with$var"), "\"with\\$var\"");
/// ```
pub fn shellquote(s: &str) -> String {
    let escaped = SHELL_ESCAPE_RE.replace_all(s, r"\$1");
    format!("\"{}\"", escaped)
}

/// Result of a shell command execution.
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// The exit code of the command (0 = success, -1 = killed by signal).
    pub exit_code: i32,
    /// Raw stdout, untrimmed. Leading whitespace is significant to LLDP parsers.
    pub stdout: String,
    /// Trimmed stderr.
    pub stderr: String,
}

impl ExecResult {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns the combined output (stdout + stderr) for error messages.
    pub fn combined_output(&self) -> String {
        let stdout = self.stdout.trim();
        if self.stderr.is_empty() {
            stdout.to_string()
        } else if stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", stdout, self.stderr)
        }
    }

    /// Converts a non-zero exit into [`LldpError::ShellCommandFailed`].
    pub fn into_stdout(self, cmd: &str) -> LldpResult<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(LldpError::ShellCommandFailed {
                command: cmd.to_string(),
                exit_code: self.exit_code,
                output: self.combined_output(),
            })
        }
    }
}

/// Executes a shell command, killing it if it runs longer than `timeout`.
///
/// The command runs through `/bin/sh -c` to support redirects such as
/// `2>/dev/null`.
///
/// # Returns
///
/// * `Ok(ExecResult)` - The command ran to completion (any exit code)
/// * `Err(LldpError::ShellExec)` - The command could not be spawned
/// * `Err(LldpError::CommandTimeout)` - The command was killed after `timeout`
pub async fn exec(cmd: &str, timeout: Duration) -> LldpResult<ExecResult> {
    tracing::debug!(command = %cmd, timeout_ms = timeout.as_millis() as u64, "Executing shell command");

    let child = Command::new(SH_CMD)
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(output) => output.map_err(|e| LldpError::ShellExec {
            command: cmd.to_string(),
            source: e,
        })?,
        Err(_) => {
            tracing::warn!(command = %cmd, timeout_ms = timeout.as_millis() as u64, "Command timed out");
            return Err(LldpError::CommandTimeout {
                command: cmd.to_string(),
                timeout,
            });
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    let result = ExecResult {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };

    if result.success() {
        tracing::trace!(command = %cmd, exit_code = exit_code, "Command succeeded");
    } else {
        tracing::debug!(
            command = %cmd,
            exit_code = exit_code,
            stderr = %result.stderr,
            "Command failed"
        );
    }

    Ok(result)
}

/// Locates an executable.
///
/// A program containing `/` is checked as a path. A bare name is searched on
/// `PATH` and then in [`SBIN_DIRS`].
pub fn which(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains('/') {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    let path_dirs: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|p| std::env::split_paths(&p).collect())
        .unwrap_or_default();

    path_dirs
        .into_iter()
        .chain(SBIN_DIRS.iter().map(PathBuf::from))
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shellquote_simple() {
        assert_eq!(shellquote("simple"), "\"simple\"");
        assert_eq!(shellquote("eth0"), "\"eth0\"");
        assert_eq!(shellquote("enp3s0f1"), "\"enp3s0f1\"");
    }

    #[test]
    fn test_shellquote_special_chars() {
        // Dollar sign (variable expansion)
        assert_eq!(shellquote("$HOME"), "\"\\$HOME\"");

        // Backtick (command substitution)
        assert_eq!(shellquote("`whoami`"), "\"\\`whoami\\`\"");

        // Double quote
        assert_eq!(shellquote("say \"hello\""), "\"say \\\"hello\\\"\"");

        // Backslash
        assert_eq!(shellquote("path\\to"), "\"path\\\\to\"");
    }

    #[test]
    fn test_shellquote_empty() {
        assert_eq!(shellquote(""), "\"\"");
    }

    #[test]
    fn test_exec_result_combined() {
        let result = ExecResult {
            exit_code: 0,
            stdout: "stdout\n".to_string(),
            stderr: "stderr".to_string(),
        };
        assert!(result.success());
        assert_eq!(result.combined_output(), "stdout\nstderr");
    }

    #[test]
    fn test_into_stdout_failure() {
        let result = ExecResult {
            exit_code: 1,
            stdout: "".to_string(),
            stderr: "Device not found".to_string(),
        };
        match result.into_stdout("lldptool get-tlv") {
            Err(LldpError::ShellCommandFailed { exit_code, output, .. }) => {
                assert_eq!(exit_code, 1);
                assert_eq!(output, "Device not found");
            }
            other => panic!("Expected ShellCommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exec_keeps_leading_whitespace() {
        let result = exec("printf '  switch1\\n'", Duration::from_secs(5)).await.unwrap();
        assert!(result.success());
        assert_eq!(result.stdout, "  switch1\n");
    }

    #[tokio::test]
    async fn test_exec_failure() {
        let result = exec("exit 42", Duration::from_secs(5)).await.unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, 42);
    }

    #[tokio::test]
    async fn test_exec_separates_streams() {
        let result = exec("echo oops 1>&2; echo out", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "oops");
    }

    #[tokio::test]
    async fn test_exec_timeout() {
        let result = exec("sleep 5", Duration::from_millis(100)).await;
        match result {
            Err(LldpError::CommandTimeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("Expected CommandTimeout, got {:?}", other),
        }
    }

    #[test]
    fn test_which_finds_sh() {
        assert!(which("sh").is_some());
        assert_eq!(which(SH_CMD), Some(PathBuf::from(SH_CMD)));
    }

    #[test]
    fn test_which_missing() {
        assert_eq!(which("definitely-not-an-lldp-tool-xyz"), None);
        assert_eq!(which("/nonexistent/lldptool"), None);
        assert_eq!(which(""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_which_requires_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("lldptool");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert_eq!(which(tool.to_str().unwrap()), None);

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(which(tool.to_str().unwrap()), Some(tool));
    }
}
