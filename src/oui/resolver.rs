//! MAC address → vendor resolution.

use std::sync::Arc;

use crate::oui::mac::MacAddress;
use crate::oui::registry::OuiRegistry;
use crate::oui::types::{MacLookupError, MacLookupResult, VendorInfo, LOCALLY_ADMINISTERED};

/// Resolves the vendor behind a hardware address.
#[derive(Clone)]
pub struct MacVendorResolver {
    registry: Arc<dyn OuiRegistry>,
}

impl MacVendorResolver {
    pub fn new(registry: Arc<dyn OuiRegistry>) -> Self {
        Self { registry }
    }

    /// Classify `query` and look up its vendor.
    ///
    /// Locally administered addresses are answered from the address bits
    /// alone; the registry is only consulted for vendor-assigned prefixes.
    pub async fn resolve(&self, query: &str) -> MacLookupResult<VendorInfo> {
        let mac = MacAddress::parse(query)?;
        let oui = mac.oui();
        let multicast = mac.is_multicast();

        if mac.is_locally_administered() {
            tracing::debug!(oui = %oui, multicast, "Locally administered address");
            return Ok(VendorInfo {
                oui,
                organization: LOCALLY_ADMINISTERED.to_string(),
                multicast,
                locally_administered: true,
            });
        }

        let line = self.registry.find_line(&oui).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read OUI registry");
            MacLookupError::ResourceMissing(e)
        })?;

        let Some(line) = line else {
            tracing::debug!(oui = %oui, "No registry entry");
            return Err(MacLookupError::NotFound { oui, multicast });
        };

        let organization = organization_field(&line).ok_or_else(|| {
            tracing::error!(line = %line, "Malformed OUI registry line");
            MacLookupError::FormatError { line: line.clone() }
        })?;

        Ok(VendorInfo {
            oui,
            organization: organization.to_string(),
            multicast,
            locally_administered: false,
        })
    }
}

/// Split `<prefix> <kind> <organization...>` and return the organization.
///
/// Fields are separated by whitespace runs; the organization is the whole
/// remainder after the second field and must not be empty.
fn organization_field(line: &str) -> Option<&str> {
    let (_prefix, rest) = line.trim_start().split_once(char::is_whitespace)?;
    let (_kind, rest) = rest.trim_start().split_once(char::is_whitespace)?;
    let organization = rest.trim();
    (!organization.is_empty()).then_some(organization)
}
