//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolvers and handlers produce:
//!     → logging.rs (structured tracing events, per-request spans)
//!     → metrics.rs (request counters, latency histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, when enabled)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Request ID flows through the trace span of every request
//! - Metric macros are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::{init_metrics, record_request};
