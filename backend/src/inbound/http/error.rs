//! HTTP mapping for the status envelope.
//!
//! Use-cases already decide the code and message a client sees; this module
//! only turns a [`StatusResponse`] or [`Outcome`] into an Actix response with
//! the matching HTTP status, and rejects malformed request bodies and path
//! parameters with a 400 envelope before they reach a use-case.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::Serialize;
use tracing::field::display;
use tracing::{debug, error, warn};

use crate::domain::{Outcome, StatusResponse};
use crate::middleware::trace::TraceId;

/// Message sent with every 400 response.
pub const INVALID_REQUEST: &str = "Requisição inválida";

fn http_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or_else(|_| {
        error!(code, "status envelope carries an invalid HTTP code");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Render a status envelope with its own code as the HTTP status.
///
/// Server errors are logged with the request's trace id so a client-reported
/// `trace-id` header leads straight to the failure.
pub fn status_response(status: StatusResponse) -> HttpResponse {
    let code = http_status(status.code());
    if code.is_server_error() {
        warn!(
            trace_id = TraceId::current().map(display),
            code = status.code(),
            message = status.message(),
            details = status.details(),
            "request failed"
        );
    }
    HttpResponse::build(code).json(status)
}

/// Render a payload as 200 or fall back to the status envelope.
pub fn outcome_response<T: Serialize>(outcome: Outcome<T>) -> HttpResponse {
    match outcome {
        Outcome::Payload(payload) => HttpResponse::Ok().json(payload),
        Outcome::Status(status) => status_response(status),
    }
}

/// A request rejected before reaching a use-case.
#[derive(Debug)]
pub struct InvalidRequest(StatusResponse);

impl InvalidRequest {
    /// Wrap `details` in the 400 envelope.
    pub fn new(details: impl Into<String>) -> Self {
        Self(StatusResponse::bad_request(INVALID_REQUEST).with_details(details))
    }

    /// The envelope sent to the client.
    pub fn status(&self) -> &StatusResponse {
        &self.0
    }
}

impl fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.details() {
            Some(details) => write!(f, "{}: {details}", self.0.message()),
            None => f.write_str(self.0.message()),
        }
    }
}

impl ResponseError for InvalidRequest {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(&self.0)
    }
}

/// JSON extractor configuration turning body errors into [`InvalidRequest`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        debug!(error = %err, path = req.path(), "rejected request body");
        InvalidRequest::new(err.to_string()).into()
    })
}

/// Path extractor configuration turning unparsable segments into
/// [`InvalidRequest`].
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, req: &HttpRequest| {
        debug!(error = %err, path = req.path(), "rejected path parameter");
        InvalidRequest::new(err.to_string()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(StatusResponse::created("criado"), StatusCode::CREATED)]
    #[case(StatusResponse::not_found("sumiu"), StatusCode::NOT_FOUND)]
    #[case(StatusResponse::internal("falhou"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_becomes_http_status(
        #[case] status: StatusResponse,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(status_response(status).status(), expected);
    }

    #[actix_web::test]
    async fn server_error_inside_a_trace_scope_keeps_the_envelope() {
        let trace_id: TraceId = "9f0c6a44-5d1b-4d8e-9a63-0c8c1c7e2b11"
            .parse()
            .expect("valid trace id");

        let response = TraceId::scope(trace_id, async {
            status_response(StatusResponse::internal("falhou").with_details("boom"))
        })
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "falhou");
        assert_eq!(body["details"], "boom");
    }

    #[rstest]
    fn out_of_range_code_falls_back_to_500() {
        let response = status_response(StatusResponse::new(42, "weird"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn payload_outcome_is_200() {
        let response = outcome_response(Outcome::Payload(serde_json::json!({"id": 1})));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], 1);
    }

    #[actix_web::test]
    async fn invalid_request_renders_envelope() {
        let response = InvalidRequest::new("missing field `name`").error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "Requisição inválida");
        assert_eq!(body["details"], "missing field `name`");
    }
}
