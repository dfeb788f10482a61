//! QuickSearch: URL shortcut and lookup service library.

pub mod canonical;
pub mod config;
pub mod http;
pub mod intel;
pub mod journey;
pub mod lifecycle;
pub mod observability;
pub mod oui;
pub mod search;

pub use config::schema::QuickSearchConfig;
pub use http::HttpServer;
pub use lifecycle::{Services, Shutdown};
