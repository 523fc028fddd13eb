//! Patient HTTP handlers.
//!
//! ```text
//! POST   /patient/list
//! GET    /patient/{id}
//! GET    /patient/personal-id/{personal_id}
//! POST   /patient/create
//! PUT    /patient/{id}
//! DELETE /patient/{id}
//! ```
//!
//! Handlers only translate between HTTP and the [`PatientUseCases`] port.
//! Every response body is either a payload or the status envelope.
//!
//! [`PatientUseCases`]: crate::domain::ports::PatientUseCases

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    CreatePatientRequest, Outcome, PatientFilter, PatientId, StatusResponse, UpdatePatientRequest,
};
use crate::inbound::http::error::{
    InvalidRequest, json_config, outcome_response, path_config, status_response,
};
use crate::inbound::http::schemas::{
    CreatePatientSchema, PatientPageViewSchema, PatientViewSchema, StatusResponseSchema,
    UpdatePatientSchema,
};
use crate::inbound::http::state::HttpState;

/// Request body for listing patients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ListPatientsRequest {
    /// 1-based page number.
    #[schema(example = 1, minimum = 1)]
    pub page: u32,
    /// Page size.
    #[schema(example = 10, minimum = 1)]
    pub per_page: u32,
    /// Case-sensitive substring of the patient name.
    #[schema(example = "John")]
    #[serde(default)]
    pub name: Option<String>,
}

impl TryFrom<ListPatientsRequest> for PatientFilter {
    type Error = InvalidRequest;

    fn try_from(value: ListPatientsRequest) -> Result<Self, Self::Error> {
        let page = PageRequest::new(value.page, value.per_page)
            .map_err(|err| InvalidRequest::new(err.to_string()))?;
        Ok(PatientFilter::new(page, value.name))
    }
}

fn log_status<T>(operation: &'static str, outcome: &Outcome<T>) {
    match outcome.status() {
        Some(status) => debug!(operation, code = status.code(), "patient request finished"),
        None => debug!(operation, code = 200, "patient request finished"),
    }
}

fn log_write(operation: &'static str, status: &StatusResponse) {
    debug!(operation, code = status.code(), "patient request finished");
}

/// List patients, optionally filtered by name.
#[utoipa::path(
    post,
    path = "/patient/list",
    request_body = ListPatientsRequest,
    responses(
        (status = 200, description = "Page of patients", body = PatientPageViewSchema),
        (status = 204, description = "No patient matches the filter", body = StatusResponseSchema),
        (status = 400, description = "Invalid request", body = StatusResponseSchema),
        (status = 500, description = "Listing failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[post("/patient/list")]
pub async fn list_patients(
    state: web::Data<HttpState>,
    payload: web::Json<ListPatientsRequest>,
) -> Result<HttpResponse, InvalidRequest> {
    let filter = PatientFilter::try_from(payload.into_inner())?;
    debug!(
        page = filter.page().page(),
        per_page = filter.page().per_page(),
        name = filter.name(),
        "list patients requested"
    );
    let outcome = state.patients.list_patients(filter).await;
    log_status("list_patients", &outcome);
    Ok(outcome_response(outcome))
}

/// Fetch one patient by identifier.
#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient", body = PatientViewSchema),
        (status = 400, description = "Invalid identifier", body = StatusResponseSchema),
        (status = 404, description = "Patient not found", body = StatusResponseSchema),
        (status = 500, description = "Lookup failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patient/{id}")]
pub async fn get_patient(state: web::Data<HttpState>, path: web::Path<i32>) -> HttpResponse {
    let id = PatientId::new(path.into_inner());
    debug!(patient_id = %id, "get patient requested");
    let outcome = state.patients.get_patient(id).await;
    log_status("get_patient", &outcome);
    outcome_response(outcome)
}

/// Fetch the first patient with the given personal identifier.
#[utoipa::path(
    get,
    path = "/patient/personal-id/{personal_id}",
    params(("personal_id" = String, Path, description = "National personal identifier")),
    responses(
        (status = 200, description = "Patient", body = PatientViewSchema),
        (status = 404, description = "Patient not found", body = StatusResponseSchema),
        (status = 500, description = "Lookup failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatientByPersonalId"
)]
#[get("/patient/personal-id/{personal_id}")]
pub async fn get_patient_by_personal_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let personal_id = path.into_inner();
    debug!(personal_id = %personal_id, "get patient by personal id requested");
    let outcome = state.patients.get_patient_by_personal_id(&personal_id).await;
    log_status("get_patient_by_personal_id", &outcome);
    outcome_response(outcome)
}

/// Create a patient with an optional address.
#[utoipa::path(
    post,
    path = "/patient/create",
    request_body = CreatePatientSchema,
    responses(
        (status = 201, description = "Patient created", body = StatusResponseSchema),
        (status = 400, description = "Invalid request", body = StatusResponseSchema),
        (status = 500, description = "Creation failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patient/create")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePatientRequest>,
) -> HttpResponse {
    debug!("create patient requested");
    let status = state.patients.create_patient(payload.into_inner()).await;
    log_write("create_patient", &status);
    status_response(status)
}

/// Partially update a patient.
#[utoipa::path(
    put,
    path = "/patient/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    request_body = UpdatePatientSchema,
    responses(
        (status = 200, description = "Patient updated", body = StatusResponseSchema),
        (status = 400, description = "Invalid request", body = StatusResponseSchema),
        (status = 404, description = "Patient not found", body = StatusResponseSchema),
        (status = 500, description = "Update failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[put("/patient/{id}")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdatePatientRequest>,
) -> HttpResponse {
    let id = PatientId::new(path.into_inner());
    debug!(patient_id = %id, "update patient requested");
    let status = state.patients.update_patient(id, payload.into_inner()).await;
    log_write("update_patient", &status);
    status_response(status)
}

/// Delete a patient and its address.
#[utoipa::path(
    delete,
    path = "/patient/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient deleted", body = StatusResponseSchema),
        (status = 400, description = "Invalid identifier", body = StatusResponseSchema),
        (status = 404, description = "Patient not found", body = StatusResponseSchema),
        (status = 500, description = "Deletion failed", body = StatusResponseSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/patient/{id}")]
pub async fn delete_patient(state: web::Data<HttpState>, path: web::Path<i32>) -> HttpResponse {
    let id = PatientId::new(path.into_inner());
    debug!(patient_id = %id, "delete patient requested");
    let status = state.patients.delete_patient(id).await;
    log_write("delete_patient", &status);
    status_response(status)
}

/// Register the patient routes and the extractor error configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(list_patients)
        .service(create_patient)
        .service(get_patient_by_personal_id)
        .service(get_patient)
        .service(update_patient)
        .service(delete_patient);
}

#[cfg(test)]
#[path = "patients_tests.rs"]
mod tests;
