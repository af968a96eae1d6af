//! Fact values and key naming.

use std::fmt;

use lldp_types::MacAddress;
use serde::Serialize;

use crate::catalog::Attribute;

/// Prefix shared by every published fact key.
pub const FACT_KEY_PREFIX: &str = "lldp_neighbor";

/// A present neighbor fact value.
///
/// Absence is modelled as `Option::None` by every producer; there is no
/// "empty" variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Free text (names, addresses, MTU as printed by the agent).
    Text(String),
    /// Integer value (PVID).
    Integer(i64),
    /// Canonical MAC address (chassis ID).
    Mac(MacAddress),
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Text(text) => f.write_str(text),
            FactValue::Integer(value) => write!(f, "{}", value),
            FactValue::Mac(mac) => write!(f, "{}", mac),
        }
    }
}

/// Builds `lldp_neighbor_<attribute>_<interface>`.
pub fn fact_key(attribute: Attribute, interface: &str) -> String {
    format!("{}_{}_{}", FACT_KEY_PREFIX, attribute.name(), interface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_key() {
        assert_eq!(fact_key(Attribute::SysName, "eth0"), "lldp_neighbor_sysName_eth0");
        assert_eq!(
            fact_key(Attribute::ManagementAddressV6, "em1"),
            "lldp_neighbor_mngAddr_ipv6_em1"
        );
        assert_eq!(fact_key(Attribute::PortVlanId, "eth1"), "lldp_neighbor_PVID_eth1");
    }

    #[test]
    fn test_display() {
        assert_eq!(FactValue::Text("switch1".into()).to_string(), "switch1");
        assert_eq!(FactValue::Integer(42).to_string(), "42");
        let mac = MacAddress::new([0x00, 0x1b, 0x21, 0x3c, 0x9d, 0xf8]);
        assert_eq!(FactValue::Mac(mac).to_string(), "00:1b:21:3c:9d:f8");
    }

    #[test]
    fn test_serialize_untagged() {
        assert_eq!(serde_json::to_string(&FactValue::Integer(100)).unwrap(), "100");
        assert_eq!(
            serde_json::to_string(&FactValue::Text("9216".into())).unwrap(),
            "\"9216\""
        );
    }
}
