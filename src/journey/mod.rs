//! Train journey lookup.
//!
//! # Data Flow
//! ```text
//! (number, date?, country?)
//!     → resolver.rs (validate input, default date/country)
//!     → source.rs (fetch flat backing array for (number, date))
//!     → unravel.rs (rebuild nested value from index 0)
//!     → types.rs (deserialize Journeys)
//!     → filter: touches country AND not a bus, upstream order kept
//!     → NoMatch | Single(link) | Choices([(label, link)])
//! ```
//!
//! # Design Decisions
//! - Every resolution failure surfaces as one generic message at the HTTP
//!   boundary; the detail goes to the log only
//! - Input errors (number, date, country) are reported as such

pub mod countries;
pub mod resolver;
pub mod source;
pub mod types;
pub mod unravel;

pub use resolver::{JourneySettings, TrainJourneyResolver};
pub use source::{HttpJourneySource, JourneySource};
pub use types::{Journey, JourneyError, JourneyMatch, JourneyOutcome, JourneyResult, Stop};
pub use unravel::{unravel, UnravelError};
