//! Configuration file support for lldp-facts
//!
//! Loads and validates configuration from TOML files.
//! Default location: /etc/lldp-facts/lldp-facts.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lldp_common::shell::LLDPTOOL_CMD;
use lldp_common::{LldpError, LldpResult};

use crate::interfaces::{InterfaceSource, SYSFS_NET_DIR};
use crate::query::QueryOptions;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/lldp-facts/lldp-facts.toml";

/// lldptool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LldptoolConfig {
    /// Tool name or path
    #[serde(default = "default_tool_path")]
    pub path: String,

    /// Run the tool through `sudo -n`
    #[serde(default = "default_use_sudo")]
    pub use_sudo: bool,

    /// Per-query timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Interface discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfacesConfig {
    /// Explicit interface list; sysfs is read when unset
    #[serde(default)]
    pub list: Option<Vec<String>>,

    /// sysfs directory listing the host's interfaces
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: PathBuf,
}

/// Fact publishing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactsConfig {
    /// Publish fact keys in lowercase
    #[serde(default)]
    pub lowercase_keys: bool,
}

/// Complete lldp-facts configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LldpFactsConfig {
    #[serde(default)]
    pub lldptool: LldptoolConfig,

    #[serde(default)]
    pub interfaces: InterfacesConfig,

    #[serde(default)]
    pub facts: FactsConfig,
}

fn default_tool_path() -> String {
    LLDPTOOL_CMD.to_string()
}

fn default_use_sudo() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_sysfs_root() -> PathBuf {
    PathBuf::from(SYSFS_NET_DIR)
}

impl Default for LldptoolConfig {
    fn default() -> Self {
        Self {
            path: default_tool_path(),
            use_sudo: default_use_sudo(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for InterfacesConfig {
    fn default() -> Self {
        Self {
            list: None,
            sysfs_root: default_sysfs_root(),
        }
    }
}

impl LldpFactsConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> LldpResult<Self> {
        toml::from_str(content).map_err(|e| LldpError::invalid_config("toml", e.to_string()))
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> LldpResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| match e {
                LldpError::InvalidConfig { message, .. } => {
                    LldpError::invalid_config(path.display().to_string(), message)
                }
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(LldpError::Io(e)),
        }
    }

    /// Load from default location or defaults
    pub fn load() -> LldpResult<Self> {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Per-query timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.lldptool.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> LldpResult<()> {
        if self.lldptool.path.trim().is_empty() {
            return Err(LldpError::invalid_config("lldptool.path", "must not be empty"));
        }
        if self.lldptool.timeout_secs == 0 {
            return Err(LldpError::invalid_config(
                "lldptool.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Options for the query executor
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            tool: self.lldptool.path.clone(),
            use_sudo: self.lldptool.use_sudo,
            timeout: self.timeout(),
        }
    }

    /// Where interface names come from
    pub fn interface_source(&self) -> InterfaceSource {
        match &self.interfaces.list {
            Some(list) => InterfaceSource::List(list.clone()),
            None => InterfaceSource::Sysfs(self.interfaces.sysfs_root.clone()),
        }
    }
}
