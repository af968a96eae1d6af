//! Common types for LLDP neighbor discovery.
//!
//! This crate provides type-safe representations of the values the
//! neighbor-discovery pipeline passes around:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses in canonical form
//! - [`TlvCode`]: numeric TLV selectors understood by `lldptool -V`

mod mac;
mod tlv;

pub use mac::MacAddress;
pub use tlv::TlvCode;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid TLV code: {0}")]
    InvalidTlvCode(String),
}
