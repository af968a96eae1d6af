//! Query executor: runs `lldptool get-tlv` against the local `lldpad`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use lldp_common::shell::{self, shellquote, LLDPTOOL_CMD, SUDO_CMD, TIMEOUT_CMD};
use lldp_common::{LldpError, LldpResult};
use lldp_types::TlvCode;

/// Default per-query timeout.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Seconds between the watchdog's SIGTERM and its SIGKILL.
const KILL_AFTER_SECS: u64 = 1;

/// Source of raw neighbor TLV text for one interface.
///
/// A failed query is indistinguishable from "no neighbor": implementations
/// return `None` and never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LldpQuery: Send + Sync {
    /// Returns the tool's raw output for `tlv` on `interface`, or `None`.
    async fn query(&self, interface: &str, tlv: TlvCode) -> Option<String>;
}

/// How `lldptool` is located and invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Tool name (searched on `PATH` and sbin) or path.
    pub tool: String,
    /// Prefix the command with non-interactive `sudo`.
    pub use_sudo: bool,
    /// Time limit for a single query.
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            tool: LLDPTOOL_CMD.to_string(),
            use_sudo: true,
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// [`LldpQuery`] backed by the installed `lldptool` binary.
#[derive(Debug, Clone)]
pub struct LldptoolExecutor {
    tool_path: PathBuf,
    watchdog: Option<PathBuf>,
    use_sudo: bool,
    timeout: Duration,
}

impl LldptoolExecutor {
    /// Locates the tool once. Fails with [`LldpError::ToolNotInstalled`] if
    /// it is not present, which disables the whole pipeline.
    pub fn detect(options: &QueryOptions) -> LldpResult<Self> {
        let tool_path =
            shell::which(&options.tool).ok_or_else(|| LldpError::tool_not_installed(&options.tool))?;
        debug!(tool = %tool_path.display(), "Found lldptool");

        let watchdog = shell::which(TIMEOUT_CMD);
        if watchdog.is_none() {
            warn!("timeout(1) not found; a hung lldptool may outlive its query");
        }

        Ok(Self {
            tool_path,
            watchdog,
            use_sudo: options.use_sudo,
            timeout: options.timeout,
        })
    }

    /// Path of the detected tool.
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    /// Builds `[timeout -k 1 <secs> ][sudo -n ]lldptool get-tlv -n -i <interface> -V <tlv> 2>/dev/null`.
    ///
    /// The watchdog kills `sudo` and everything it forked. Killing only the
    /// spawned process would orphan the tool behind `sudo`.
    pub fn command(&self, interface: &str, tlv: TlvCode) -> String {
        let watchdog = match &self.watchdog {
            Some(path) => format!(
                "{} -k {} {} ",
                shellquote(&path.to_string_lossy()),
                KILL_AFTER_SECS,
                self.timeout.as_secs_f64()
            ),
            None => String::new(),
        };
        let sudo = if self.use_sudo {
            format!("{} -n ", SUDO_CMD)
        } else {
            String::new()
        };
        format!(
            "exec {}{}{} get-tlv -n -i {} -V {} 2>/dev/null",
            watchdog,
            sudo,
            shellquote(&self.tool_path.to_string_lossy()),
            shellquote(interface),
            tlv
        )
    }

    /// Limit for the spawned shell. With a watchdog it only fires if the
    /// watchdog itself hangs, so it waits out the SIGKILL stage too.
    fn exec_timeout(&self) -> Duration {
        match self.watchdog {
            Some(_) => self.timeout + Duration::from_secs(KILL_AFTER_SECS + 1),
            None => self.timeout,
        }
    }

    async fn run(&self, interface: &str, tlv: TlvCode) -> LldpResult<String> {
        let cmd = self.command(interface, tlv);
        shell::exec(&cmd, self.exec_timeout()).await?.into_stdout(&cmd)
    }
}

#[async_trait]
impl LldpQuery for LldptoolExecutor {
    #[instrument(skip_all, fields(interface = %interface, tlv = %tlv))]
    async fn query(&self, interface: &str, tlv: TlvCode) -> Option<String> {
        match self.run(interface, tlv).await {
            Ok(output) if output.trim().is_empty() => {
                debug!("lldptool produced no output");
                None
            }
            Ok(output) => Some(output),
            Err(e) if e.is_query_failure() => {
                debug!(error = %e, "lldptool query failed");
                None
            }
            Err(e) => {
                warn!(error = %e, "lldptool query failed unexpectedly");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(tool: &str, use_sudo: bool) -> LldptoolExecutor {
        LldptoolExecutor {
            tool_path: PathBuf::from(tool),
            watchdog: None,
            use_sudo,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_command_with_sudo() {
        let exec = executor("/usr/sbin/lldptool", true);
        assert_eq!(
            exec.command("eth0", TlvCode::new(5)),
            "exec sudo -n \"/usr/sbin/lldptool\" get-tlv -n -i \"eth0\" -V 5 2>/dev/null"
        );
    }

    #[test]
    fn test_command_wraps_sudo_in_watchdog() {
        let exec = LldptoolExecutor {
            watchdog: Some(PathBuf::from("/usr/bin/timeout")),
            timeout: Duration::from_millis(2500),
            ..executor("/usr/sbin/lldptool", true)
        };
        assert_eq!(
            exec.command("eth0", TlvCode::new(5)),
            "exec \"/usr/bin/timeout\" -k 1 2.5 sudo -n \"/usr/sbin/lldptool\" get-tlv -n -i \"eth0\" -V 5 2>/dev/null"
        );
        assert_eq!(exec.exec_timeout(), Duration::from_millis(4500));
    }

    #[test]
    fn test_exec_timeout_without_watchdog() {
        assert_eq!(executor("lldptool", false).exec_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_command_org_specific_tlv() {
        let exec = executor("/usr/sbin/lldptool", false);
        assert_eq!(
            exec.command("eth1", TlvCode::new(0x0080_c201)),
            "exec \"/usr/sbin/lldptool\" get-tlv -n -i \"eth1\" -V 0x0080c201 2>/dev/null"
        );
    }

    #[test]
    fn test_command_quotes_interface() {
        let exec = executor("lldptool", false);
        let cmd = exec.command("eth0$(reboot)", TlvCode::new(1));
        assert!(cmd.contains("-i \"eth0\\$(reboot)\""));
    }

    #[test]
    fn test_detect_missing_tool() {
        let options = QueryOptions {
            tool: "/nonexistent/lldptool".to_string(),
            ..QueryOptions::default()
        };
        match LldptoolExecutor::detect(&options) {
            Err(LldpError::ToolNotInstalled { tool }) => assert_eq!(tool, "/nonexistent/lldptool"),
            other => panic!("Expected ToolNotInstalled, got {:?}", other),
        }
    }

    #[test]
    fn test_default_options() {
        let options = QueryOptions::default();
        assert_eq!(options.tool, "lldptool");
        assert!(options.use_sudo);
        assert_eq!(options.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_query_nonzero_exit_is_absent() {
        // `false` ignores its arguments and exits 1
        let exec = executor("/bin/false", false);
        assert_eq!(exec.query("eth0", TlvCode::new(5)).await, None);
    }

    #[tokio::test]
    async fn test_query_empty_output_is_absent() {
        // `true` ignores its arguments and prints nothing
        let exec = executor("/bin/true", false);
        assert_eq!(exec.query("eth0", TlvCode::new(5)).await, None);
    }

    #[tokio::test]
    async fn test_query_returns_raw_stdout() {
        // echo prints its arguments back
        let exec = executor("/bin/echo", false);
        let output = exec.query("eth0", TlvCode::new(5)).await.unwrap();
        assert_eq!(output, "get-tlv -n -i eth0 -V 5\n");
    }
}
