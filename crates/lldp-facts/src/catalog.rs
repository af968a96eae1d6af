//! TLV catalog: the neighbor attributes published as facts.

use std::fmt;

use lldp_types::TlvCode;

/// Base TLV: Chassis ID.
pub const TLV_CHASSIS_ID: TlvCode = TlvCode::new(1);

/// Base TLV: Port ID.
pub const TLV_PORT_ID: TlvCode = TlvCode::new(2);

/// Base TLV: System Name.
pub const TLV_SYSTEM_NAME: TlvCode = TlvCode::new(5);

/// Base TLV: Management Address. Carries either address family.
pub const TLV_MANAGEMENT_ADDRESS: TlvCode = TlvCode::new(8);

/// IEEE 802.1 (OUI 00-80-C2) subtype 1: Port VLAN ID.
pub const TLV_PORT_VLAN_ID: TlvCode = TlvCode::new(0x0080_c201);

/// IEEE 802.3 (OUI 00-12-0F) subtype 4: Maximum Frame Size.
pub const TLV_MAXIMUM_FRAME_SIZE: TlvCode = TlvCode::new(0x0012_0f04);

/// A neighbor attribute that is queried and published per interface.
///
/// [`Attribute::ManagementAddressV4`] and [`Attribute::ManagementAddressV6`]
/// share TLV code 8. `lldptool` prints whichever address the neighbor sent;
/// the parser tells the two apart by the `IPv4:`/`IPv6:` line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    ChassisId,
    PortId,
    SysName,
    ManagementAddressV4,
    ManagementAddressV6,
    PortVlanId,
    MaximumTransmissionUnit,
}

impl Attribute {
    /// Every attribute, in fact registration order.
    pub const ALL: [Attribute; 7] = [
        Attribute::ChassisId,
        Attribute::PortId,
        Attribute::SysName,
        Attribute::ManagementAddressV4,
        Attribute::ManagementAddressV6,
        Attribute::PortVlanId,
        Attribute::MaximumTransmissionUnit,
    ];

    /// Name used in fact keys.
    pub const fn name(&self) -> &'static str {
        match self {
            Attribute::ChassisId => "chassisID",
            Attribute::PortId => "portID",
            Attribute::SysName => "sysName",
            Attribute::ManagementAddressV4 => "mngAddr_ipv4",
            Attribute::ManagementAddressV6 => "mngAddr_ipv6",
            Attribute::PortVlanId => "PVID",
            Attribute::MaximumTransmissionUnit => "MTU",
        }
    }

    /// TLV code passed to `lldptool -V`.
    pub const fn tlv_code(&self) -> TlvCode {
        match self {
            Attribute::ChassisId => TLV_CHASSIS_ID,
            Attribute::PortId => TLV_PORT_ID,
            Attribute::SysName => TLV_SYSTEM_NAME,
            Attribute::ManagementAddressV4 | Attribute::ManagementAddressV6 => {
                TLV_MANAGEMENT_ADDRESS
            }
            Attribute::PortVlanId => TLV_PORT_VLAN_ID,
            Attribute::MaximumTransmissionUnit => TLV_MAXIMUM_FRAME_SIZE,
        }
    }

    /// Looks an attribute up by its fact-key name. Case-insensitive, so keys
    /// that were lowercased on output still resolve.
    pub fn from_name(name: &str) -> Option<Attribute> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
