//! Network address intelligence.
//!
//! # Data Flow
//! ```text
//! address
//!     → reverse.rs (unwrap IPv4-mapped, build reverse-lookup name)
//!     → directory.rs PTR lookup            (fail → "no PTR")
//!     → directory.rs TXT <origin zone>     (fail → "No information available")
//!     → for each ASN in the first field:
//!         directory.rs TXT AS<n>.<asn zone> (fail → "No information available")
//!     → AsnReport lines
//! ```
//!
//! # Design Decisions
//! - No error leaves this subsystem; every step degrades to placeholder text
//! - Lookups are sequential; one attempt each

pub mod directory;
pub mod resolver;
pub mod reverse;

pub use directory::{DirectoryLookup, DnsDirectory, LookupError};
pub use resolver::{AsnReport, NetworkIntelResolver, NO_INFORMATION, NO_PTR};
