//! TLV code type as understood by `lldptool -V`.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric TLV selector.
///
/// Base IEEE 802.1AB TLVs (types 0-127) are plain numbers. Organizationally
/// specific TLVs are encoded as `OUI << 8 | subtype`, e.g. the IEEE 802.1
/// Port VLAN ID TLV is `0x0080c201`.
///
/// # Examples
///
/// ```
/// use lldp_types::TlvCode;
///
/// assert_eq!(TlvCode::new(5).to_string(), "5");
/// assert_eq!(TlvCode::new(0x0080_c201).to_string(), "0x0080c201");
///
/// let code: TlvCode = "0x00120f04".parse().unwrap();
/// assert_eq!(code.as_u32(), 0x0012_0f04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct TlvCode(u32);

impl TlvCode {
    /// Largest code rendered in decimal; anything above is organizationally specific.
    pub const MAX_BASE: u32 = 0xff;

    /// Creates a TLV code.
    pub const fn new(code: u32) -> Self {
        TlvCode(code)
    }

    /// Returns the raw code.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns true for organizationally specific (OUI-qualified) codes.
    pub const fn is_org_specific(&self) -> bool {
        self.0 > Self::MAX_BASE
    }
}

impl fmt::Display for TlvCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_org_specific() {
            write!(f, "0x{:08x}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for TlvCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => s.parse::<u32>(),
        };
        parsed
            .map(TlvCode)
            .map_err(|_| ParseError::InvalidTlvCode(s.to_string()))
    }
}

impl From<u32> for TlvCode {
    fn from(code: u32) -> Self {
        TlvCode(code)
    }
}

impl From<TlvCode> for u32 {
    fn from(code: TlvCode) -> u32 {
        code.0
    }
}
