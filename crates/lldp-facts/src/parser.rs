//! Extraction rules for `lldptool get-tlv -n` output.
//!
//! Each attribute has one line pattern. Every line of the output is tested
//! and the capture of the *last* matching line is kept, so later lines
//! override earlier ones. Captures are trimmed on the right; a matching line
//! whose capture is empty after trimming still overrides, and leaves the
//! value absent.
//!
//! Typical output for `-V 5`:
//!
//! ```text
//! System Name TLV
//!         switch1.example.net
//! ```

use lldp_types::MacAddress;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::catalog::Attribute;
use crate::types::FactValue;

static INDENTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+(.*)").expect("Invalid regex pattern"));
static MAC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"MAC:\s+(.*)").expect("Invalid regex pattern"));
static IFNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Ifname:\s+(.*)").expect("Invalid regex pattern"));
static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"IPv4:\s+(.*)").expect("Invalid regex pattern"));
static IPV6_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"IPv6:\s+(.*)").expect("Invalid regex pattern"));
static INFO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Info:\s+(.*)").expect("Invalid regex pattern"));

/// How a captured string becomes a fact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Text,
    Mac,
    Integer,
}

/// Extraction rule for one attribute.
#[derive(Debug, Clone, Copy)]
struct Rule {
    pattern: &'static Lazy<Regex>,
    conversion: Conversion,
}

impl Rule {
    fn for_attribute(attribute: Attribute) -> Rule {
        let (pattern, conversion) = match attribute {
            Attribute::SysName | Attribute::MaximumTransmissionUnit => (&INDENTED_RE, Conversion::Text),
            Attribute::ChassisId => (&MAC_RE, Conversion::Mac),
            Attribute::PortId => (&IFNAME_RE, Conversion::Text),
            Attribute::ManagementAddressV4 => (&IPV4_RE, Conversion::Text),
            Attribute::ManagementAddressV6 => (&IPV6_RE, Conversion::Text),
            Attribute::PortVlanId => (&INFO_RE, Conversion::Integer),
        };
        Rule { pattern, conversion }
    }

    fn apply(&self, raw: &str) -> Option<FactValue> {
        let captured = last_capture(self.pattern, raw);
        match self.conversion {
            Conversion::Text => captured.map(|text| FactValue::Text(text.to_string())),
            // Standardization runs even when nothing matched; it maps None to None.
            Conversion::Mac => MacAddress::standardize(captured).map(FactValue::Mac),
            Conversion::Integer => captured.and_then(parse_integer).map(FactValue::Integer),
        }
    }
}

/// Returns the right-trimmed capture of the last line matching `pattern`,
/// or `None` if that capture is blank.
fn last_capture<'a>(pattern: &Regex, raw: &'a str) -> Option<&'a str> {
    raw.lines()
        .fold(None, |last, line| match pattern.captures(line) {
            Some(caps) => Some(caps.get(1).map_or("", |m| m.as_str().trim_end())),
            None => last,
        })
        .filter(|text| !text.is_empty())
}

/// Parses the leading decimal integer of `text`, ignoring anything after it.
///
/// `"42"` and `"42 (untagged)"` both give 42. Text without leading digits,
/// or a value that overflows `i64`, gives `None`.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..sign_len + digits_len].parse().ok()
}

/// Parses raw tool output for `attribute`. Absent output gives an absent value.
pub fn parse(attribute: Attribute, raw: Option<&str>) -> Option<FactValue> {
    let raw = raw?;
    let value = Rule::for_attribute(attribute).apply(raw);
    if value.is_none() {
        debug!(attribute = %attribute, "No matching line in lldptool output");
    }
    value
}

/// Parses raw output for an attribute given by fact-key name.
///
/// Names outside the catalog have no extraction rule and always give `None`.
pub fn parse_named(name: &str, raw: Option<&str>) -> Option<FactValue> {
    match Attribute::from_name(name) {
        Some(attribute) => parse(attribute, raw),
        None => {
            debug!(attribute = %name, "No extraction rule for attribute");
            None
        }
    }
}
