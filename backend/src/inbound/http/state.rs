//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! use-case port, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::PatientUseCases;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub patients: Arc<dyn PatientUseCases>,
}

impl HttpState {
    pub fn new(patients: Arc<dyn PatientUseCases>) -> Self {
        Self { patients }
    }
}
