//! Driving port for the patient use-cases.
//!
//! Inbound adapters depend on this trait only. Every method returns a value,
//! never an error: failures have already been converted into a
//! [`StatusResponse`] with the code and message clients should see.

use async_trait::async_trait;

use crate::domain::{
    CreatePatientRequest, Outcome, PatientFilter, PatientId, PatientPageView, PatientView,
    StatusResponse, UpdatePatientRequest,
};

/// Use-case port for managing patient records.
#[async_trait]
pub trait PatientUseCases: Send + Sync {
    /// List patients matching `filter`; a 204 status when nothing matches.
    async fn list_patients(&self, filter: PatientFilter) -> Outcome<PatientPageView>;

    /// Fetch one patient by primary key.
    async fn get_patient(&self, id: PatientId) -> Outcome<PatientView>;

    /// Fetch the first patient with the given personal identifier.
    async fn get_patient_by_personal_id(&self, personal_id: &str) -> Outcome<PatientView>;

    /// Create a patient and its optional address.
    async fn create_patient(&self, request: CreatePatientRequest) -> StatusResponse;

    /// Apply a partial update to an existing patient.
    async fn update_patient(&self, id: PatientId, request: UpdatePatientRequest)
    -> StatusResponse;

    /// Delete a patient and its address.
    async fn delete_patient(&self, id: PatientId) -> StatusResponse;
}
