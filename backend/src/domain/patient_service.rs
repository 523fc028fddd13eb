//! Patient use-case service.
//!
//! Implements [`PatientUseCases`] on top of a [`PatientRepository`]. Each
//! operation runs a private fallible step returning [`PatientServiceError`]
//! and converts the result into a payload or [`StatusResponse`] at the end,
//! so nothing escapes the use-case boundary as an error.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ports::{
    PatientRepository, PatientRepositoryError, PatientUpdate, PatientUseCases,
};
use crate::domain::{
    CreatePatientRequest, DateCodec, DateCodecError, Outcome, Patient, PatientChangeError,
    PatientFilter, PatientId, PatientPageView, PatientView, StatusResponse, UpdatePatientRequest,
};

/// Client-visible messages. Clients match on these strings, so they are
/// kept byte-for-byte stable.
pub mod messages {
    pub const LIST_EMPTY: &str = "Paciente não encontrado.";
    pub const LIST_FAILED: &str = "Erro ao listar os pacientes";
    pub const NOT_FOUND: &str = "paciente não encontrado.";
    pub const GET_FAILED: &str = "Erro ao obter o paciente";
    pub const CREATED: &str = "paciente criado com sucesso.";
    pub const CREATE_FAILED: &str = "Erro ao Criar o paciente";
    pub const DUPLICATE_DATA: &str = "Dados informados já existem";
    pub const UPDATE_NOT_FOUND: &str = "Paciente não encontrado.";
    pub const UPDATED: &str = "paciente alterado com sucesso.";
    pub const UPDATE_DUPLICATE: &str = "Os dados informados já existem";
    pub const UPDATE_FAILED: &str = "Erro ao Alterar o paciente";
    pub const DELETED: &str = "paciente excluído com sucesso.";
    pub const DELETE_FAILED: &str = "Erro ao excluir o paciente";
}

/// Failures inside a single use-case step.
#[derive(Debug, Error)]
enum PatientServiceError {
    #[error(transparent)]
    Repository(#[from] PatientRepositoryError),
    #[error(transparent)]
    BirthDate(#[from] DateCodecError),
    #[error(transparent)]
    Change(#[from] PatientChangeError),
    #[error("patient {0} not found")]
    NotFound(PatientId),
}

impl PatientServiceError {
    fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Repository(PatientRepositoryError::UniqueViolation { .. })
        )
    }
}

/// Patient use-case service backed by an injected repository.
#[derive(Clone)]
pub struct PatientService<R> {
    repository: Arc<R>,
    codec: DateCodec,
}

impl<R> PatientService<R> {
    /// Create a service over `repository`, parsing and rendering birth dates
    /// with `codec`.
    pub fn new(repository: Arc<R>, codec: DateCodec) -> Self {
        Self { repository, codec }
    }

    /// The date codec used for payloads and views.
    pub fn codec(&self) -> &DateCodec {
        &self.codec
    }
}

impl<R> PatientService<R>
where
    R: PatientRepository,
{
    async fn try_list(
        &self,
        filter: &PatientFilter,
    ) -> Result<Option<PatientPageView>, PatientServiceError> {
        let page = self.repository.find_page(filter).await?;
        if page.is_empty() {
            return Ok(None);
        }
        let page = page.map(|patient| PatientView::from_patient(patient, &self.codec));
        Ok(Some(PatientPageView::from(page)))
    }

    async fn try_create(
        &self,
        request: CreatePatientRequest,
    ) -> Result<PatientId, PatientServiceError> {
        let new_patient = request.into_new_patient(&self.codec)?;
        Ok(self.repository.insert(&new_patient).await?)
    }

    async fn try_update(
        &self,
        id: PatientId,
        request: UpdatePatientRequest,
    ) -> Result<(), PatientServiceError> {
        let patch = request.into_patch(&self.codec);
        match self.repository.update(id, &patch).await? {
            PatientUpdate::Applied(_) => Ok(()),
            PatientUpdate::NotFound => Err(PatientServiceError::NotFound(id)),
            PatientUpdate::Rejected(err) => Err(err.into()),
        }
    }

    fn view_outcome(
        &self,
        found: Result<Option<Patient>, PatientRepositoryError>,
    ) -> Outcome<PatientView> {
        match found {
            Ok(Some(patient)) => Outcome::Payload(PatientView::from_patient(patient, &self.codec)),
            Ok(None) => StatusResponse::not_found(messages::NOT_FOUND).into(),
            Err(err) => {
                warn!(error = %err, "patient lookup failed");
                StatusResponse::internal(messages::GET_FAILED)
                    .with_details(err.to_string())
                    .into()
            }
        }
    }
}

#[async_trait]
impl<R> PatientUseCases for PatientService<R>
where
    R: PatientRepository,
{
    async fn list_patients(&self, filter: PatientFilter) -> Outcome<PatientPageView> {
        match self.try_list(&filter).await {
            Ok(Some(page)) => {
                debug!(total = page.total, returned = page.patients.len(), "patients listed");
                Outcome::Payload(page)
            }
            Ok(None) => StatusResponse::no_content(messages::LIST_EMPTY).into(),
            Err(err) => {
                warn!(error = %err, "listing patients failed");
                StatusResponse::internal(messages::LIST_FAILED)
                    .with_details(err.to_string())
                    .into()
            }
        }
    }

    async fn get_patient(&self, id: PatientId) -> Outcome<PatientView> {
        let found = self.repository.find_by_id(id).await;
        self.view_outcome(found)
    }

    async fn get_patient_by_personal_id(&self, personal_id: &str) -> Outcome<PatientView> {
        let found = self.repository.find_by_personal_id(personal_id).await;
        self.view_outcome(found)
    }

    async fn create_patient(&self, request: CreatePatientRequest) -> StatusResponse {
        match self.try_create(request).await {
            Ok(id) => {
                debug!(patient_id = %id, "patient created");
                StatusResponse::created(messages::CREATED)
            }
            Err(err) if err.is_unique_violation() => {
                warn!(error = %err, "patient creation rejected by constraint");
                StatusResponse::internal(messages::CREATE_FAILED)
                    .with_details(messages::DUPLICATE_DATA)
            }
            Err(err) => {
                warn!(error = %err, "patient creation failed");
                StatusResponse::internal(messages::CREATE_FAILED).with_details(err.to_string())
            }
        }
    }

    async fn update_patient(&self, id: PatientId, request: UpdatePatientRequest) -> StatusResponse {
        match self.try_update(id, request).await {
            Ok(()) => {
                debug!(patient_id = %id, "patient updated");
                StatusResponse::ok(messages::UPDATED)
            }
            Err(PatientServiceError::NotFound(_)) => {
                StatusResponse::not_found(messages::UPDATE_NOT_FOUND)
            }
            Err(err) if err.is_unique_violation() => {
                warn!(error = %err, patient_id = %id, "patient update rejected by constraint");
                StatusResponse::internal(messages::UPDATE_DUPLICATE)
            }
            Err(err) => {
                warn!(error = %err, patient_id = %id, "patient update failed");
                StatusResponse::internal(messages::UPDATE_FAILED).with_details(err.to_string())
            }
        }
    }

    async fn delete_patient(&self, id: PatientId) -> StatusResponse {
        match self.repository.delete(id).await {
            Ok(true) => {
                debug!(patient_id = %id, "patient deleted");
                StatusResponse::ok(messages::DELETED)
            }
            Ok(false) => StatusResponse::not_found(messages::NOT_FOUND),
            Err(err) => {
                warn!(error = %err, patient_id = %id, "patient deletion failed");
                StatusResponse::internal(messages::DELETE_FAILED).with_details(err.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
