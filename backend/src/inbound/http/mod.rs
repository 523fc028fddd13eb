//! HTTP inbound adapter exposing the patient REST endpoints and health checks.

pub mod error;
pub mod health;
pub mod patients;
pub mod schemas;
pub mod state;

pub use patients::configure;
