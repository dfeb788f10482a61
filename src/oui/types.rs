//! Vendor lookup result and error types.

use thiserror::Error;

/// Organization text reported for addresses assigned by software.
pub const LOCALLY_ADMINISTERED: &str = "locally administered address";

/// Outcome of a successful vendor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorInfo {
    /// Normalized prefix, e.g. `3C-D9-2B`.
    pub oui: String,
    /// Vendor name, or [`LOCALLY_ADMINISTERED`].
    pub organization: String,
    pub multicast: bool,
    pub locally_administered: bool,
}

impl VendorInfo {
    /// Organization with the multicast marker appended when the bit is set.
    pub fn describe(&self) -> String {
        with_multicast(&self.organization, self.multicast)
    }
}

pub(crate) fn with_multicast(text: &str, multicast: bool) -> String {
    if multicast {
        format!("{text}, multicast")
    } else {
        text.to_string()
    }
}

/// Errors surfaced by the vendor resolver.
#[derive(Debug, Error)]
pub enum MacLookupError {
    /// Input does not start with three hex octets.
    #[error("Invalid input (not an EUI)")]
    InvalidInput,

    /// The registry file could not be opened or read.
    #[error("OUI file missing")]
    ResourceMissing(#[source] std::io::Error),

    /// A matching registry line is not `<prefix> <kind> <organization>`.
    #[error("Format error in OUI file")]
    FormatError { line: String },

    /// The registry has no line for this prefix.
    #[error("No organisation found")]
    NotFound { oui: String, multicast: bool },
}

/// Result type for vendor lookups.
pub type MacLookupResult<T> = Result<T, MacLookupError>;
