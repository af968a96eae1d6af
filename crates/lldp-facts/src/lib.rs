//! LLDP neighbor facts for host inventory.
//!
//! This crate implements the `lldp-facts` collector, which asks the local
//! Open-LLDP agent (`lldpad`, through `lldptool`) what each Ethernet
//! interface's switch neighbor advertised, and publishes the answers as
//! named facts.
//!
//! # Pipeline
//!
//! | Stage | Module | Purpose |
//! |-------|--------|---------|
//! | Interface Enumerator | [`interfaces`] | Host interfaces minus `lo` and `bond<N>` |
//! | TLV Catalog | [`catalog`] | Attribute names and TLV codes |
//! | Query Executor | [`query`] | `lldptool get-tlv -n -i <if> -V <tlv>` |
//! | Attribute Parser | [`parser`] | Last-matching-line extraction per attribute |
//! | Fact Registry | [`registry`] | Lazy, write-once `lldp_neighbor_<attr>_<if>` facts |
//!
//! Every failure (tool missing, query failed, no matching line) degrades to
//! an absent fact. Nothing here stops the consuming inventory run.
//!
//! # Example
//!
//! ```ignore
//! use lldp_facts::{FactRegistry, LldpFactsConfig};
//!
//! let config = LldpFactsConfig::load()?;
//! let interfaces = config.interface_source().names()?;
//! let registry = FactRegistry::discover(&config.query_options(), interfaces);
//! let facts = registry.resolve_all().await;
//! ```

pub mod catalog;
pub mod config;
pub mod interfaces;
pub mod output;
pub mod parser;
pub mod query;
pub mod registry;
mod types;

pub use catalog::Attribute;
pub use config::LldpFactsConfig;
pub use interfaces::{eligible_interfaces, split_interface_list, InterfaceSource};
pub use output::Facts;
pub use query::{LldpQuery, LldptoolExecutor, QueryOptions};
pub use registry::FactRegistry;
pub use types::{fact_key, FactValue, FACT_KEY_PREFIX};
