//! Interface enumeration and filtering.
//!
//! Loopback and bonded aggregate interfaces never carry LLDP adjacencies of
//! their own (bond members do), so they are dropped before any query is
//! issued.

use std::fs;
use std::path::PathBuf;

use lldp_common::LldpResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default location of the kernel's interface list.
pub const SYSFS_NET_DIR: &str = "/sys/class/net";

/// Names that must never be queried: `lo`, and `bond<digits>` including its
/// VLAN sub-interfaces (`bond0.100`).
static EXCLUDED_IFACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^lo$|^bond[0-9]+").expect("Invalid regex pattern"));

/// Returns true if the interface may be queried for neighbors.
pub fn is_eligible(name: &str) -> bool {
    !EXCLUDED_IFACE_RE.is_match(name)
}

/// Filters an ordered interface list, preserving the order of what remains.
pub fn eligible_interfaces<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .map(Into::<String>::into)
        .filter(|name| is_eligible(name))
        .collect()
}

/// Splits a comma-delimited interface list (`"eth0,lo,bond0"`).
///
/// Surrounding whitespace and empty segments are dropped.
pub fn split_interface_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where the host's interface names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceSource {
    /// An explicit list, used as given.
    List(Vec<String>),
    /// Entries of a sysfs `class/net` directory, sorted by name.
    Sysfs(PathBuf),
}

impl Default for InterfaceSource {
    fn default() -> Self {
        InterfaceSource::Sysfs(PathBuf::from(SYSFS_NET_DIR))
    }
}

impl InterfaceSource {
    /// Returns every interface name the source knows about, unfiltered.
    pub fn names(&self) -> LldpResult<Vec<String>> {
        match self {
            InterfaceSource::List(names) => Ok(names.clone()),
            InterfaceSource::Sysfs(dir) => {
                let mut names = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let entry = entry?;
                    if let Some(name) = entry.file_name().to_str() {
                        names.push(name.to_string());
                    }
                }
                names.sort();
                tracing::debug!(dir = %dir.display(), count = names.len(), "Read interface list");
                Ok(names)
            }
        }
    }

    /// Returns the interfaces eligible for neighbor queries.
    pub fn eligible(&self) -> LldpResult<Vec<String>> {
        Ok(eligible_interfaces(self.names()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_excludes_loopback_and_bonds() {
        let names = ["lo", "bond0", "eth0", "bond12", "eth1"];
        assert_eq!(eligible_interfaces(names), vec!["eth0", "eth1"]);
    }

    #[test]
    fn test_preserves_order() {
        let names = ["eth2", "lo", "em1", "eth0"];
        assert_eq!(eligible_interfaces(names), vec!["eth2", "em1", "eth0"]);
    }

    #[test]
    fn test_only_exact_patterns_are_excluded() {
        assert!(is_eligible("lo0"));
        assert!(is_eligible("loop"));
        assert!(is_eligible("bond"));
        assert!(is_eligible("bondx"));
        assert!(is_eligible("mybond0"));
        assert!(is_eligible("vlo"));
        assert!(!is_eligible("lo"));
        assert!(!is_eligible("bond0"));
        assert!(!is_eligible("bond0.100"));
    }

    #[test]
    fn test_empty_input() {
        assert!(eligible_interfaces(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_split_interface_list() {
        assert_eq!(
            split_interface_list("eth0,lo, bond0 ,,eth1"),
            vec!["eth0", "lo", "bond0", "eth1"]
        );
        assert!(split_interface_list("").is_empty());
    }

    #[test]
    fn test_list_source() {
        let source = InterfaceSource::List(vec!["lo".into(), "eth0".into()]);
        assert_eq!(source.names().unwrap(), vec!["lo", "eth0"]);
        assert_eq!(source.eligible().unwrap(), vec!["eth0"]);
    }

    #[test]
    fn test_sysfs_source() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["eth1", "lo", "bond0", "eth0"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let source = InterfaceSource::Sysfs(dir.path().to_path_buf());
        assert_eq!(source.names().unwrap(), vec!["bond0", "eth0", "eth1", "lo"]);
        assert_eq!(source.eligible().unwrap(), vec!["eth0", "eth1"]);
    }

    #[test]
    fn test_sysfs_source_missing_dir() {
        let source = InterfaceSource::Sysfs(PathBuf::from("/nonexistent/class/net"));
        assert!(source.names().is_err());
    }
}
