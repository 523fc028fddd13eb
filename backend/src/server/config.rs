//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use patient_registry::domain::ports::PatientUseCases;

/// Everything the server needs besides health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) patients: Arc<dyn PatientUseCases>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, patients: Arc<dyn PatientUseCases>) -> Self {
        Self {
            bind_addr,
            patients,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
