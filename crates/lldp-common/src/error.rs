//! Error types for LLDP fact collection.
//!
//! Nothing in the discovery pipeline is fatal: these errors exist so the
//! executor can say *why* a query produced no data before the result is
//! downgraded to an absent fact. Only configuration errors reach the user.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for LLDP fact operations.
pub type LldpResult<T> = Result<T, LldpError>;

/// Errors that can occur while collecting LLDP neighbor facts.
#[derive(Debug, Error)]
pub enum LldpError {
    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// Shell command did not finish in time and was killed.
    #[error("Shell command timed out after {timeout:?}: '{command}'")]
    CommandTimeout {
        /// The command that timed out.
        command: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The LLDP query tool is not present on this host.
    #[error("LLDP query tool '{tool}' is not installed")]
    ToolNotInstalled {
        /// The tool name or path that was looked up.
        tool: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// IO error (config file, sysfs).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LldpError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a tool-not-installed error.
    pub fn tool_not_installed(tool: impl Into<String>) -> Self {
        Self::ToolNotInstalled { tool: tool.into() }
    }

    /// Returns true if this error describes a single failed query, as opposed
    /// to a problem with the host or the configuration.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            LldpError::ShellExec { .. }
                | LldpError::ShellCommandFailed { .. }
                | LldpError::CommandTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LldpError::tool_not_installed("lldptool");
        assert_eq!(err.to_string(), "LLDP query tool 'lldptool' is not installed");
    }

    #[test]
    fn test_invalid_config() {
        let err = LldpError::invalid_config("timeout_secs", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for timeout_secs: must be greater than zero"
        );
    }

    #[test]
    fn test_shell_command_failed() {
        let err = LldpError::ShellCommandFailed {
            command: "lldptool get-tlv -n -i eth0 -V 5".to_string(),
            exit_code: 255,
            output: "".to_string(),
        };
        assert!(err.to_string().contains("get-tlv"));
        assert!(err.to_string().contains("exit code 255"));
    }

    #[test]
    fn test_timeout_display() {
        let err = LldpError::CommandTimeout {
            command: "lldptool".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "Shell command timed out after 10s: 'lldptool'");
    }

    #[test]
    fn test_is_query_failure() {
        let timeout = LldpError::CommandTimeout {
            command: "lldptool".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert!(timeout.is_query_failure());
        assert!(!LldpError::tool_not_installed("lldptool").is_query_failure());
        assert!(!LldpError::invalid_config("path", "empty").is_query_failure());
    }
}
