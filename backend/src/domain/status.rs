//! Uniform status envelope returned by the patient use-cases.
//!
//! Every use-case call ends in either a payload or a [`StatusResponse`]. The
//! envelope carries an HTTP-style numeric code so inbound adapters can forward
//! it without a mapping table, but the domain never depends on an HTTP crate.

use serde::{Deserialize, Serialize};

/// Success codes.
pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;
/// Failure codes.
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_ERROR: u16 = 500;

/// `{code, message, details?}` acknowledgement or failure payload.
///
/// # Examples
/// ```
/// use patient_registry::domain::StatusResponse;
///
/// let status = StatusResponse::not_found("paciente não encontrado.");
/// assert_eq!(status.code(), 404);
/// assert!(status.details().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    code: u16,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl StatusResponse {
    /// Build a status without details.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a human-readable detail string.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// 200 acknowledgement.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(OK, message)
    }

    /// 201 acknowledgement.
    pub fn created(message: impl Into<String>) -> Self {
        Self::new(CREATED, message)
    }

    /// 204 "nothing matched" outcome.
    pub fn no_content(message: impl Into<String>) -> Self {
        Self::new(NO_CONTENT, message)
    }

    /// 400 malformed request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(BAD_REQUEST, message)
    }

    /// 404 missing resource.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(NOT_FOUND, message)
    }

    /// 500 failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Whether the code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Result of a read use-case: the requested payload, or a status explaining
/// why there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Payload(T),
    Status(StatusResponse),
}

impl<T> Outcome<T> {
    /// Borrow the status, if this outcome carries one.
    pub fn status(&self) -> Option<&StatusResponse> {
        match self {
            Self::Payload(_) => None,
            Self::Status(status) => Some(status),
        }
    }

    /// Take the payload, if this outcome carries one.
    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Payload(payload) => Some(payload),
            Self::Status(_) => None,
        }
    }
}

impl<T> From<StatusResponse> for Outcome<T> {
    fn from(value: StatusResponse) -> Self {
        Self::Status(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn details_are_omitted_when_absent() {
        let value = serde_json::to_value(StatusResponse::no_content("Paciente não encontrado."))
            .expect("serialise");
        assert_eq!(
            value,
            json!({ "code": 204, "message": "Paciente não encontrado." })
        );
    }

    #[rstest]
    fn details_are_serialised_when_present() {
        let status = StatusResponse::internal("Erro ao Criar o paciente")
            .with_details("Dados informados já existem");
        let value = serde_json::to_value(&status).expect("serialise");
        assert_eq!(
            value,
            json!({
                "code": 500,
                "message": "Erro ao Criar o paciente",
                "details": "Dados informados já existem",
            })
        );
    }

    #[rstest]
    #[case(StatusResponse::ok("x"), true)]
    #[case(StatusResponse::created("x"), true)]
    #[case(StatusResponse::no_content("x"), true)]
    #[case(StatusResponse::bad_request("x"), false)]
    #[case(StatusResponse::not_found("x"), false)]
    #[case(StatusResponse::internal("x"), false)]
    fn success_range(#[case] status: StatusResponse, #[case] expected: bool) {
        assert_eq!(status.is_success(), expected);
    }

    #[rstest]
    fn outcome_accessors() {
        let payload: Outcome<u8> = Outcome::Payload(3);
        let status: Outcome<u8> = StatusResponse::not_found("missing").into();

        assert!(payload.status().is_none());
        assert_eq!(payload.into_payload(), Some(3));
        assert_eq!(status.status().map(StatusResponse::code), Some(404));
        assert_eq!(status.into_payload(), None);
    }
}
