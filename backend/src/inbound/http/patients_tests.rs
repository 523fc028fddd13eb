//! Tests for patient HTTP handlers.
//!
//! The use-case port is replaced by a canned stub so these tests only cover
//! request parsing and the status-to-HTTP mapping.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::PatientUseCases;
use crate::domain::{PatientPageView, PatientView};

/// Answers every call with a fixed status, or a payload for id 1.
struct StubPatients;

fn sample_view() -> PatientView {
    PatientView {
        id: 1,
        personal_id: "12345678900".to_owned(),
        name: "John Doe".to_owned(),
        email: "johndoe@example.com".to_owned(),
        phone: None,
        gender: None,
        birth_date: "1990-01-01".to_owned(),
        address: None,
    }
}

#[async_trait]
impl PatientUseCases for StubPatients {
    async fn list_patients(&self, filter: PatientFilter) -> Outcome<PatientPageView> {
        if filter.name() == Some("Nobody") {
            return StatusResponse::no_content("Paciente não encontrado.").into();
        }
        Outcome::Payload(PatientPageView {
            total: 1,
            page: filter.page().page(),
            per_page: filter.page().per_page(),
            patients: vec![sample_view()],
        })
    }

    async fn get_patient(&self, id: PatientId) -> Outcome<PatientView> {
        if id == PatientId::new(1) {
            Outcome::Payload(sample_view())
        } else {
            StatusResponse::not_found("paciente não encontrado.").into()
        }
    }

    async fn get_patient_by_personal_id(&self, personal_id: &str) -> Outcome<PatientView> {
        if personal_id == "12345678900" {
            Outcome::Payload(sample_view())
        } else {
            StatusResponse::not_found("paciente não encontrado.").into()
        }
    }

    async fn create_patient(&self, request: CreatePatientRequest) -> StatusResponse {
        if request.email == "taken@example.com" {
            StatusResponse::internal("Erro ao Criar o paciente")
                .with_details("Dados informados já existem")
        } else {
            StatusResponse::created("paciente criado com sucesso.")
        }
    }

    async fn update_patient(&self, id: PatientId, _request: UpdatePatientRequest) -> StatusResponse {
        if id == PatientId::new(1) {
            StatusResponse::ok("paciente alterado com sucesso.")
        } else {
            StatusResponse::not_found("Paciente não encontrado.")
        }
    }

    async fn delete_patient(&self, id: PatientId) -> StatusResponse {
        if id == PatientId::new(1) {
            StatusResponse::ok("paciente excluído com sucesso.")
        } else {
            StatusResponse::not_found("paciente não encontrado.")
        }
    }
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(StubPatients))))
        .configure(configure)
}

async fn send(request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app()).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

fn patient_payload() -> Value {
    json!({
        "name": "John Doe",
        "personal_id": "12345678900",
        "email": "johndoe@example.com",
        "phone": "999999999",
        "gender": "Male",
        "birth_date": "1990-01-01",
        "address": {
            "zipcode": "12345-678",
            "address": "Rua da Esperança",
            "neighborhood": "Centro",
            "city": "Rio de Janeiro",
            "state": "RJ",
            "number": "123"
        }
    })
}

#[actix_web::test]
async fn list_returns_page_envelope() {
    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/list")
            .set_json(json!({"page": 2, "per_page": 5, "name": "John"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["patients"][0]["birth_date"], "1990-01-01");
    assert_eq!(body["patients"][0]["address"], Value::Null);
}

#[actix_web::test]
async fn list_without_matches_is_204() {
    let (status, _) = send(
        actix_test::TestRequest::post()
            .uri("/patient/list")
            .set_json(json!({"page": 1, "per_page": 10, "name": "Nobody"})),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[rstest]
#[case(json!({"page": 0, "per_page": 10}))]
#[case(json!({"page": 1, "per_page": 0}))]
#[case(json!({"page": -1, "per_page": 10}))]
#[case(json!({"per_page": 10}))]
#[actix_web::test]
async fn list_rejects_invalid_paging(#[case] payload: Value) {
    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/list")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "Requisição inválida");
    assert!(body["details"].is_string());
}

#[actix_web::test]
async fn get_returns_view_or_404() {
    let (status, body) = send(actix_test::TestRequest::get().uri("/patient/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "johndoe@example.com");

    let (status, body) = send(actix_test::TestRequest::get().uri("/patient/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"code": 404, "message": "paciente não encontrado."})
    );
}

#[actix_web::test]
async fn get_by_personal_id_uses_the_literal_route() {
    let (status, body) = send(
        actix_test::TestRequest::get().uri("/patient/personal-id/12345678900"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["personal_id"], "12345678900");

    let (status, _) = send(actix_test::TestRequest::get().uri("/patient/personal-id/0")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_returns_201_envelope() {
    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/create")
            .set_json(patient_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"code": 201, "message": "paciente criado com sucesso."})
    );
}

#[actix_web::test]
async fn create_forwards_duplicate_status() {
    let mut payload = patient_payload();
    payload["email"] = json!("taken@example.com");

    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/create")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Dados informados já existem");
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("birth_date")]
#[actix_web::test]
async fn create_rejects_missing_required_field(#[case] field: &str) {
    let mut payload = patient_payload();
    payload
        .as_object_mut()
        .expect("object payload")
        .remove(field);

    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/create")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Requisição inválida");
    assert!(
        body["details"]
            .as_str()
            .is_some_and(|details| details.contains(field))
    );
}

#[actix_web::test]
async fn create_rejects_malformed_json() {
    let (status, body) = send(
        actix_test::TestRequest::post()
            .uri("/patient/create")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn update_accepts_partial_payload() {
    let (status, body) = send(
        actix_test::TestRequest::put()
            .uri("/patient/1")
            .set_json(json!({"name": "Jane Doe"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "paciente alterado com sucesso.");

    let (status, body) = send(
        actix_test::TestRequest::put()
            .uri("/patient/99999")
            .set_json(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Paciente não encontrado.");
}

#[actix_web::test]
async fn delete_maps_status() {
    let (status, body) = send(actix_test::TestRequest::delete().uri("/patient/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "paciente excluído com sucesso.");

    let (status, _) = send(actix_test::TestRequest::delete().uri("/patient/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/patient/abc"))]
#[case(actix_test::TestRequest::get().uri("/patient/99999999999"))]
#[case(actix_test::TestRequest::put().uri("/patient/abc").set_json(json!({})))]
#[case(actix_test::TestRequest::delete().uri("/patient/-99999999999"))]
#[actix_web::test]
async fn unparsable_id_is_rejected_with_envelope(#[case] request: actix_test::TestRequest) {
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["message"], "Requisição inválida");
    assert!(body["details"].is_string());
}

#[rstest]
fn list_request_with_empty_name_has_no_filter() {
    let filter = PatientFilter::try_from(ListPatientsRequest {
        page: 1,
        per_page: 10,
        name: Some(String::new()),
    })
    .expect("valid request");

    assert_eq!(filter.name(), None);
}
