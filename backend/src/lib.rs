//! Patient registry library: domain, adapters and HTTP wiring.
//!
//! The binary in `main.rs` only loads settings, opens the pool and starts the
//! server; everything it assembles lives here so tests can build the same app.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
