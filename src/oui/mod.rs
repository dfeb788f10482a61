//! Hardware address vendor lookup.
//!
//! # Data Flow
//! ```text
//! raw query ("3c:d9:2b:...")
//!     → mac.rs (parse leading octets, classify U/L and I/G bits)
//!     → locally administered? answer from bits, stop
//!     → registry.rs (scan flat file for first line with the prefix)
//!     → resolver.rs (split fields, build VendorInfo or typed error)
//! ```

pub mod mac;
pub mod registry;
pub mod resolver;
pub mod types;

pub use mac::{normalize, MacAddress};
pub use registry::{FileOuiRegistry, OuiRegistry};
pub use resolver::MacVendorResolver;
pub use types::{MacLookupError, MacLookupResult, VendorInfo, LOCALLY_ADMINISTERED};
