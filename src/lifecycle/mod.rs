//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Resolve module prerequisites → Build resolvers
//!     → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger() → Stop accepting → Drain in-flight requests → Exit
//! ```
//!
//! # Design Decisions
//! - Module enablement is decided once; the router never re-checks it
//! - A module whose prerequisite is missing is disabled, not fatal

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::Services;
