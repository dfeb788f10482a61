//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for quicksearch.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuickSearchConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Which resolver modules get wired into the router.
    pub modules: ModulesConfig,

    /// Vendor table settings.
    pub oui: OuiConfig,

    /// ASN directory zones.
    pub intel: IntelConfig,

    /// Journey data service settings.
    pub journey: JourneyConfig,

    /// Simple query-redirect providers.
    pub providers: Vec<ProviderConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for QuickSearchConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            modules: ModulesConfig::default(),
            oui: OuiConfig::default(),
            intel: IntelConfig::default(),
            journey: JourneyConfig::default(),
            providers: ProviderConfig::defaults(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Per-query timeout handed to the DNS lookup client, in seconds.
    pub lookup_secs: u64,

    /// Journey data fetch timeout in seconds.
    pub fetch_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            lookup_secs: 5,
            fetch_secs: 10,
        }
    }
}

/// Module switches, resolved once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub mac_vendor: bool,
    pub canonical_url: bool,
    pub network_intel: bool,
    pub train_journey: bool,
    pub search: bool,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            mac_vendor: true,
            canonical_url: true,
            network_intel: true,
            train_journey: true,
            search: true,
        }
    }
}

/// OUI vendor table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OuiConfig {
    /// Path to the flat-file vendor table (IEEE `oui.txt` layout).
    pub registry_path: String,
}

impl Default for OuiConfig {
    fn default() -> Self {
        Self {
            registry_path: "oui.txt".to_string(),
        }
    }
}

/// Zones used by the network intel lookup chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntelConfig {
    /// Replaces `in-addr.arpa` for IPv4 origin queries.
    pub origin_zone_v4: String,

    /// Replaces `ip6.arpa` for IPv6 origin queries.
    pub origin_zone_v6: String,

    /// Zone holding `AS<n>` description records.
    pub asn_zone: String,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            origin_zone_v4: "origin.asn.cymru.com".to_string(),
            origin_zone_v6: "origin6.asn.cymru.com".to_string(),
            asn_zone: "asn.cymru.com".to_string(),
        }
    }
}

/// Journey data service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JourneyConfig {
    /// Endpoint template; `{number}` and `{date}` are substituted.
    pub endpoint: String,

    /// JSON pointer to the flat backing array inside the response body.
    /// Empty means the body itself.
    pub data_pointer: String,

    /// Deep-link template; `{journey_id}`, `{category}` and `{number}` are substituted.
    pub link_template: String,

    /// Country used when the request names none (ISO 3166 alpha-2).
    pub home_country: String,

    /// IANA zone the default date is computed in.
    pub time_zone: String,

    /// Recursion bound for unravelling indexed data.
    pub max_depth: usize,

    /// Upper bound on nodes produced while unravelling; shared indices count once per use.
    pub max_nodes: usize,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://bahn.expert/api/journeys/v1/find/{number}?initialDepartureDate={date}"
                .to_string(),
            data_pointer: String::new(),
            link_template: "https://bahn.expert/details/{category}%20{number}/j/{journey_id}"
                .to_string(),
            home_country: "DE".to_string(),
            time_zone: "Europe/Berlin".to_string(),
            max_depth: 64,
            max_nodes: 100_000,
        }
    }
}

/// A search provider reachable through one or more path prefixes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Name shown on the index page.
    pub name: String,

    /// Path prefixes (e.g., "/g"); the query is everything after the prefix.
    pub paths: Vec<String>,

    /// Target URL with a single `%s` placeholder for the encoded query.
    pub url: String,
}

impl ProviderConfig {
    fn new(name: &str, paths: &[&str], url: &str) -> Self {
        Self {
            name: name.to_string(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
            url: url.to_string(),
        }
    }

    /// The provider set the service ships with.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("google", &["/google", "/g"], "https://www.google.com/search?q=%s"),
            Self::new("google_image", &["/i", "/gi"], "https://www.google.com/search?q=%s&tbm=isch"),
            Self::new("google_video", &["/v", "/gv"], "https://www.google.com/search?q=%s&tbm=vid"),
            Self::new("tineye", &["/tineye"], "https://tineye.com/search?url=%s"),
            Self::new("madison", &["/madison"], "https://qa.debian.org/madison.php?table=all&g=on&package=%s"),
            Self::new("madison_debian", &["/deb"], "https://qa.debian.org/madison.php?table=debian&g=on&package=%s"),
            Self::new("madison_ubuntu", &["/ubu"], "https://qa.debian.org/madison.php?table=ubuntu&g=on&package=%s"),
            Self::new("packages_debian", &["/dpkg"], "https://packages.debian.org/search?keywords=%s"),
            Self::new("packages_ubuntu", &["/upkg"], "http://packages.ubuntu.com/search?keywords=%s"),
            Self::new("packages_archlinux", &["/apkg"], "https://www.archlinux.org/packages/?q=%s"),
            Self::new("packages_archuserrepo", &["/aur"], "https://aur.archlinux.org/packages/?K=%s"),
            Self::new(
                "packages_freebsd_freshports",
                &["/fport", "/fports", "/freshports"],
                "https://www.freshports.org/search.php?num=20&query=%s",
            ),
        ]
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
