//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod patient_repository;
mod patient_use_cases;

#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::{PatientRepository, PatientRepositoryError, PatientUpdate};
pub use patient_use_cases::PatientUseCases;
