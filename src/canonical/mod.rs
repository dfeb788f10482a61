//! Redirect/tracking URL canonicalization.
//!
//! # Data Flow
//! ```text
//! raw URL (query string already re-attached by the caller)
//!     → rules.rs (google-redirect, amp, amazon; all evaluated, last match wins)
//!     → CanonicalUrl { original, resolved, rule }
//! ```

pub mod rules;
pub mod types;

pub use rules::UrlCanonicalizer;
pub use types::{CanonicalUrl, CanonicalizeError, Rule};
