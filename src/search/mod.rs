//! Simple query-redirect providers and the route index.
//!
//! # Data Flow
//! ```text
//! GET <provider path>/<query>[?<query string>]
//!     → SearchProvider::target (re-attach query string, form-encode)
//!     → 303 to provider URL with `%s` substituted
//!
//! GET /
//!     → render_index (one line per wired route, sorted)
//! ```

use url::form_urlencoded::byte_serialize;

use crate::config::ProviderConfig;

/// Placeholder in provider URLs replaced by the encoded query.
pub const QUERY_PLACEHOLDER: &str = "%s";

/// A search engine or package index reachable by path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProvider {
    pub name: String,
    url: String,
}

impl SearchProvider {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Redirect target for `query`. A non-empty request query string is
    /// treated as part of the search text.
    pub fn target(&self, query: &str, raw_query: Option<&str>) -> String {
        let mut text = query.to_string();
        if let Some(qs) = raw_query.filter(|qs| !qs.is_empty()) {
            text.push('?');
            text.push_str(qs);
        }
        let encoded: String = byte_serialize(text.as_bytes()).collect();
        self.url.replacen(QUERY_PLACEHOLDER, &encoded, 1)
    }
}

impl From<&ProviderConfig> for SearchProvider {
    fn from(config: &ProviderConfig) -> Self {
        Self::new(config.name.clone(), config.url.clone())
    }
}

/// One line of the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Handler name, e.g. `google` or `mac_vendor`.
    pub endpoint: String,
    /// Route with its parameters stripped, e.g. `/g/`.
    pub path: String,
}

impl IndexEntry {
    pub fn new(endpoint: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            path: path.into(),
        }
    }
}

/// Markdown listing of every entry, prefixed with `base_url`.
pub fn render_index(base_url: &str, entries: &[IndexEntry]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| format!("* {:40} {}{}", entry.endpoint, base, entry.path))
        .collect();
    lines.sort();

    let mut page = String::from(
        "QuickSearch\n===========\n\nThe following search providers are defined:\n\n",
    );
    page.push_str(&lines.join("\n"));
    page
}
