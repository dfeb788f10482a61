//! Startup orchestration.
//!
//! # Responsibilities
//! - Decide which modules are wired, from config flags and prerequisites
//! - Build each enabled resolver exactly once
//!
//! # Design Decisions
//! - Fail soft: a module that cannot start is logged and left unwired
//! - The OUI registry must exist at startup; it is re-read per lookup after that

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;

use crate::canonical::UrlCanonicalizer;
use crate::config::{ProviderConfig, QuickSearchConfig};
use crate::intel::{DnsDirectory, NetworkIntelResolver};
use crate::journey::{HttpJourneySource, JourneySettings, TrainJourneyResolver};
use crate::oui::{FileOuiRegistry, MacVendorResolver};

/// Resolvers wired into the router. `None` means the module is disabled.
#[derive(Clone, Default)]
pub struct Services {
    pub mac_vendor: Option<MacVendorResolver>,
    pub canonical_url: Option<UrlCanonicalizer>,
    pub network_intel: Option<NetworkIntelResolver>,
    pub train_journey: Option<TrainJourneyResolver>,
    /// Empty when the search module is disabled.
    pub providers: Vec<ProviderConfig>,
}

impl Services {
    /// Resolve module enablement once and build the enabled resolvers.
    pub fn from_config(config: &QuickSearchConfig) -> Self {
        let modules = &config.modules;

        let services = Self {
            mac_vendor: modules.mac_vendor.then(|| mac_vendor(config)).flatten(),
            canonical_url: modules.canonical_url.then(canonical_url).flatten(),
            network_intel: modules.network_intel.then(|| network_intel(config)),
            train_journey: modules.train_journey.then(|| train_journey(config)).flatten(),
            providers: if modules.search {
                config.providers.clone()
            } else {
                Vec::new()
            },
        };

        tracing::info!(
            mac_vendor = services.mac_vendor.is_some(),
            canonical_url = services.canonical_url.is_some(),
            network_intel = services.network_intel.is_some(),
            train_journey = services.train_journey.is_some(),
            providers = services.providers.len(),
            "Modules resolved"
        );

        services
    }
}

fn mac_vendor(config: &QuickSearchConfig) -> Option<MacVendorResolver> {
    let registry = FileOuiRegistry::new(&config.oui.registry_path);
    if !registry.exists() {
        tracing::warn!(
            path = %registry.path().display(),
            "OUI registry not found, MAC vendor lookup disabled"
        );
        return None;
    }
    Some(MacVendorResolver::new(Arc::new(registry)))
}

fn canonical_url() -> Option<UrlCanonicalizer> {
    match UrlCanonicalizer::new() {
        Ok(canonicalizer) => Some(canonicalizer),
        Err(e) => {
            tracing::error!(error = %e, "Cannot compile URL rules, canonicalizer disabled");
            None
        }
    }
}

fn network_intel(config: &QuickSearchConfig) -> NetworkIntelResolver {
    let directory = DnsDirectory::from_system_conf(Duration::from_secs(config.timeouts.lookup_secs));
    NetworkIntelResolver::new(Arc::new(directory), config.intel.clone())
}

fn train_journey(config: &QuickSearchConfig) -> Option<TrainJourneyResolver> {
    let journey = &config.journey;

    let time_zone: Tz = match journey.time_zone.parse() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::error!(time_zone = %journey.time_zone, error = %e, "Unknown time zone, train journeys disabled");
            return None;
        }
    };

    let source = match HttpJourneySource::new(journey, Duration::from_secs(config.timeouts.fetch_secs)) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Cannot build journey client, train journeys disabled");
            return None;
        }
    };

    let settings = JourneySettings {
        link_template: journey.link_template.clone(),
        home_country: journey.home_country.clone(),
        time_zone,
        max_depth: journey.max_depth,
        max_nodes: journey.max_nodes,
    };
    Some(TrainJourneyResolver::new(Arc::new(source), settings))
}
