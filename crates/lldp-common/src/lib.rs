//! Common infrastructure for the LLDP neighbor fact collector.
//!
//! - [`shell`]: Shell command execution with quoting, timeouts and binary lookup
//! - [`error`]: Error types shared by the collector crates
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use lldp_common::{shell::{self, LLDPTOOL_CMD, shellquote}, LldpResult};
//!
//! async fn sys_name(port: &str) -> LldpResult<String> {
//!     let cmd = format!("{} get-tlv -n -i {} -V 5 2>/dev/null",
//!         LLDPTOOL_CMD, shellquote(port));
//!     shell::exec(&cmd, Duration::from_secs(10)).await?.into_stdout(&cmd)
//! }
//! ```

pub mod error;
pub mod shell;

// Re-export commonly used items at crate root
pub use error::{LldpError, LldpResult};
