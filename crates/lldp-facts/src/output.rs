//! Rendering resolved facts for the consuming fact system.

use std::collections::BTreeMap;

use crate::types::FactValue;

/// Resolved facts, keyed by fact name. `None` marks an absent fact.
pub type Facts = BTreeMap<String, Option<FactValue>>;

/// Renders `key=value` lines, the external fact executable format.
/// Absent facts are left out.
pub fn render_text(facts: &Facts) -> String {
    facts
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}\n", key, v)))
        .collect()
}

/// Renders a JSON object; absent facts become `null`.
pub fn render_json(facts: &Facts) -> serde_json::Result<String> {
    serde_json::to_string_pretty(facts)
}
