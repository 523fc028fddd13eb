//! Driven port for patient persistence.
//!
//! Adapters store patients together with their optional address and must
//! honour three schema rules: e-mail addresses are unique, an address always
//! references an existing patient, and deleting a patient removes its address.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    NewPatient, Patient, PatientChangeError, PatientFilter, PatientId, PatientPatch,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by patient repository adapters.
    pub enum PatientRepositoryError {
        /// The store could not be reached or the connection dropped.
        Connection { message: String } =>
            "patient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "patient repository query failed: {message}",
        /// A uniqueness or integrity constraint rejected the write.
        UniqueViolation { constraint: String } =>
            "patient data violates constraint {constraint}",
    }
}

/// Result of applying a [`PatientPatch`] inside the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientUpdate {
    /// The patch was saved; carries the patient as stored.
    Applied(Patient),
    /// No patient has the requested identifier.
    NotFound,
    /// The patch does not fit the stored patient. Nothing was written.
    Rejected(PatientChangeError),
}

/// Port for patient storage and retrieval.
///
/// Each call runs on its own connection which the adapter releases before
/// returning, whether the call succeeded or not. Writes that touch both the
/// patient and its address are atomic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Count every match for `filter`, then fetch the requested page ordered by
    /// identifier.
    async fn find_page(&self, filter: &PatientFilter)
    -> Result<Page<Patient>, PatientRepositoryError>;

    /// Look a patient up by primary key.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Return the first patient whose personal identifier equals `personal_id`.
    async fn find_by_personal_id(
        &self,
        personal_id: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError>;

    /// Insert a patient and its address, returning the assigned identifier.
    async fn insert(&self, patient: &NewPatient) -> Result<PatientId, PatientRepositoryError>;

    /// Load the patient `id`, apply `patch` and save it as one atomic step.
    ///
    /// Concurrent patches to the same patient are serialised, so each one
    /// starts from the other's result rather than a stale copy.
    async fn update(
        &self,
        id: PatientId,
        patch: &PatientPatch,
    ) -> Result<PatientUpdate, PatientRepositoryError>;

    /// Delete a patient and, by cascade, its address.
    ///
    /// Returns `false` when no patient with `id` exists.
    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_names_the_constraint() {
        let err = PatientRepositoryError::unique_violation("patient_email_key");
        assert_eq!(
            err.to_string(),
            "patient data violates constraint patient_email_key"
        );
    }

    #[rstest]
    fn connection_error_keeps_the_cause() {
        let err = PatientRepositoryError::connection("timed out");
        assert!(matches!(err, PatientRepositoryError::Connection { .. }));
        assert!(err.to_string().ends_with("timed out"));
    }
}
