//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every patient endpoint, the health checks and the
//! schema wrappers from `inbound::http::schemas`. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::patients::ListPatientsRequest;
use crate::inbound::http::schemas::{
    AddressSchema, CreatePatientSchema, PatientPageViewSchema, PatientViewSchema,
    StatusResponseSchema, UpdatePatientSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patient API",
        version = "1.0.0",
        description = "CRUD operations over patient records and their addresses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::get_patient_by_personal_id,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ListPatientsRequest,
        StatusResponseSchema,
        AddressSchema,
        PatientViewSchema,
        PatientPageViewSchema,
        CreatePatientSchema,
        UpdatePatientSchema,
    )),
    tags(
        (name = "patients", description = "Patient records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_carries_title_and_version() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Patient API");
        assert_eq!(doc.info.version, "1.0.0");
    }

    #[rstest]
    #[case("/patient/list")]
    #[case("/patient/{id}")]
    #[case("/patient/personal-id/{personal_id}")]
    #[case("/patient/create")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn patient_item_path_has_get_put_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/patient/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    fn document_registers_status_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("crate.domain.StatusResponse"));
        assert!(schemas.contains_key("crate.domain.PatientPageView"));
    }
}
