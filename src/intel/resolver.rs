//! Reverse-name + ASN lookup chain.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use crate::config::IntelConfig;
use crate::intel::directory::DirectoryLookup;
use crate::intel::reverse::{asn_query_name, origin_query_name, unmap, version};

/// Placeholder when the reverse lookup fails.
pub const NO_PTR: &str = "no PTR";

/// Placeholder when a text-record lookup fails.
pub const NO_INFORMATION: &str = "No information available";

/// Ordered report lines: a summary line, then enrichment lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnReport {
    lines: Vec<String>,
}

impl AsnReport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn summary(&self) -> &str {
        &self.lines[0]
    }
}

impl fmt::Display for AsnReport {
    /// Lines joined and newline-terminated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Builds an [`AsnReport`] for an address. Never fails; every lookup that
/// goes wrong becomes a placeholder line.
#[derive(Clone)]
pub struct NetworkIntelResolver {
    directory: Arc<dyn DirectoryLookup>,
    zones: IntelConfig,
}

impl NetworkIntelResolver {
    pub fn new(directory: Arc<dyn DirectoryLookup>, zones: IntelConfig) -> Self {
        Self { directory, zones }
    }

    pub async fn resolve(&self, addr: IpAddr) -> AsnReport {
        let addr = unmap(addr);

        let ptr = match self.directory.reverse_name(addr).await {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(address = %addr, error = %e, "Reverse lookup failed");
                NO_PTR.to_string()
            }
        };

        let mut lines = vec![format!("{} | {} | {}", version(addr), addr, ptr)];

        let origin_name = origin_query_name(addr, &self.zones);
        let records = match self.directory.txt(&origin_name).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(query = %origin_name, error = %e, "Origin lookup failed");
                lines.push(NO_INFORMATION.to_string());
                return AsnReport { lines };
            }
        };

        for record in &records {
            let record = strip_quotes(record);
            lines.push(record.to_string());

            let asn_field = record.split('|').next().unwrap_or_default();
            for token in asn_field.split_whitespace() {
                let Ok(asn) = token.parse::<u32>() else {
                    continue;
                };
                self.describe_asn(asn, &mut lines).await;
            }
        }

        AsnReport { lines }
    }

    async fn describe_asn(&self, asn: u32, lines: &mut Vec<String>) {
        let name = asn_query_name(asn, &self.zones);
        match self.directory.txt(&name).await {
            Ok(records) => lines.extend(records.iter().map(|r| strip_quotes(r).to_string())),
            Err(e) => {
                tracing::warn!(query = %name, error = %e, "ASN description lookup failed");
                lines.push(NO_INFORMATION.to_string());
            }
        }
    }
}

fn strip_quotes(record: &str) -> &str {
    record.trim_matches('"')
}
