//! Fact registry: one lazily resolved fact per (interface, attribute).
//!
//! The set of keys is fixed when the registry is built. A value is computed
//! the first time it is read, by querying `lldptool` and parsing the output,
//! and is never recomputed afterwards.

use std::collections::{BTreeMap, HashMap, HashSet};

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::catalog::Attribute;
use crate::interfaces::eligible_interfaces;
use crate::parser::parse;
use crate::query::{LldpQuery, LldptoolExecutor, QueryOptions};
use crate::types::{fact_key, FactValue};

/// A registered fact and its write-once value.
struct FactSlot {
    key: String,
    interface: String,
    attribute: Attribute,
    value: OnceCell<Option<FactValue>>,
}

/// Registry of LLDP neighbor facts.
///
/// # Example
///
/// ```ignore
/// use lldp_facts::{Attribute, FactRegistry, QueryOptions};
///
/// let registry = FactRegistry::discover(&QueryOptions::default(), ["lo", "eth0"]);
/// let sys_name = registry.get_fact("eth0", Attribute::SysName).await;
/// ```
pub struct FactRegistry {
    query: Option<Box<dyn LldpQuery>>,
    slots: Vec<FactSlot>,
    index: HashMap<String, usize>,
    lowercase_keys: bool,
}

impl FactRegistry {
    /// Registers every catalog attribute for each eligible interface.
    ///
    /// `lo` and `bond<N>` are filtered out here; duplicate names are
    /// registered once.
    pub fn new<Q, I, S>(query: Q, interfaces: I) -> Self
    where
        Q: LldpQuery + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            query: Some(Box::new(query)),
            slots: Vec::new(),
            index: HashMap::new(),
            lowercase_keys: false,
        };

        for interface in eligible_interfaces(interfaces) {
            for attribute in Attribute::ALL {
                let key = fact_key(attribute, &interface);
                if registry.index.contains_key(&key) {
                    continue;
                }
                registry.index.insert(key.clone(), registry.slots.len());
                registry.slots.push(FactSlot {
                    key,
                    interface: interface.clone(),
                    attribute,
                    value: OnceCell::new(),
                });
            }
        }

        debug!(facts = registry.slots.len(), "Registered LLDP neighbor facts");
        registry
    }

    /// A registry with no facts, used when `lldptool` is not installed.
    pub fn disabled() -> Self {
        Self {
            query: None,
            slots: Vec::new(),
            index: HashMap::new(),
            lowercase_keys: false,
        }
    }

    /// Detects `lldptool` and registers facts backed by it.
    ///
    /// If the tool is missing the registry is [`disabled`](Self::disabled);
    /// that is an expected host configuration, not an error.
    pub fn discover<I, S>(options: &QueryOptions, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match LldptoolExecutor::detect(options) {
            Ok(executor) => Self::new(executor, interfaces),
            Err(e) => {
                info!(error = %e, "LLDP neighbor facts disabled");
                Self::disabled()
            }
        }
    }

    /// Publishes keys in lowercase, the way the host fact system normalizes
    /// fact names. Lookups by key are then case-insensitive.
    ///
    /// Interfaces differing only in case collapse into the first one listed.
    pub fn with_lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        if enabled {
            let mut seen = HashSet::new();
            self.slots.retain_mut(|slot| {
                slot.key = slot.key.to_lowercase();
                seen.insert(slot.key.clone())
            });
        }
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.key.clone(), i))
            .collect();
        self
    }

    /// Returns true if facts are backed by an installed query tool.
    pub fn is_enabled(&self) -> bool {
        self.query.is_some()
    }

    /// Number of registered facts.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no facts are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered keys, interface by interface in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.key.as_str())
    }

    /// Returns the registered form of `key`, if it is registered.
    pub fn registered_key(&self, key: &str) -> Option<&str> {
        let key = self.normalize_key(key.to_string());
        self.index.get(&key).map(|&i| self.slots[i].key.as_str())
    }

    /// Returns the fact for `attribute` on `interface`, resolving it on first use.
    ///
    /// Unregistered pairs (filtered interfaces, disabled registry) are absent.
    pub async fn get_fact(&self, interface: &str, attribute: Attribute) -> Option<FactValue> {
        let key = self.normalize_key(fact_key(attribute, interface));
        self.get(&key).await
    }

    /// Returns the fact registered under `key`, resolving it on first use.
    pub async fn get(&self, key: &str) -> Option<FactValue> {
        let key = self.normalize_key(key.to_string());
        match self.index.get(&key) {
            Some(&i) => self.resolve(&self.slots[i]).await,
            None => {
                debug!(key = %key, "Fact not registered");
                None
            }
        }
    }

    /// Resolves every registered fact, one query at a time.
    pub async fn resolve_all(&self) -> BTreeMap<String, Option<FactValue>> {
        let mut facts = BTreeMap::new();
        for slot in &self.slots {
            let value = self.resolve(slot).await;
            facts.insert(slot.key.clone(), value);
        }
        facts
    }

    async fn resolve(&self, slot: &FactSlot) -> Option<FactValue> {
        let query = self.query.as_ref()?;
        slot.value
            .get_or_init(|| async {
                let raw = query
                    .query(&slot.interface, slot.attribute.tlv_code())
                    .await;
                let value = parse(slot.attribute, raw.as_deref());
                debug!(key = %slot.key, present = value.is_some(), "Resolved fact");
                value
            })
            .await
            .clone()
    }

    fn normalize_key(&self, key: String) -> String {
        if self.lowercase_keys {
            key.to_lowercase()
        } else {
            key
        }
    }
}
