//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign request ID, open trace span)
//!     → server.rs (route to the group of an enabled module)
//!     → handlers.rs (call resolver, map outcome to status + body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
