//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; the wrappers here mirror their
//! serialised shape so the adapter layer owns every utoipa concern.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::StatusResponse`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StatusResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StatusResponseSchema {
    /// HTTP-style status code, repeated in the response status line.
    #[schema(example = 404)]
    code: u16,
    /// Fixed, client-visible message.
    #[schema(example = "paciente não encontrado.")]
    message: String,
    /// Diagnostic detail; omitted when empty.
    details: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Address`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Address)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddressSchema {
    #[schema(example = "12345-678")]
    zipcode: String,
    /// Street line.
    #[schema(example = "Rua da Esperança")]
    address: String,
    #[schema(example = "Centro")]
    neighborhood: String,
    #[schema(example = "Rio de Janeiro")]
    city: String,
    #[schema(example = "RJ")]
    state: String,
    #[schema(example = "123")]
    number: String,
}

/// OpenAPI schema for [`crate::domain::PatientView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PatientView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PatientViewSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "12345678900")]
    personal_id: String,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "johndoe@example.com")]
    email: String,
    #[schema(example = "999999999")]
    phone: Option<String>,
    #[schema(example = "Male")]
    gender: Option<String>,
    /// Rendered with the configured date pattern.
    #[schema(example = "1990-01-01")]
    birth_date: String,
    address: Option<AddressSchema>,
}

/// OpenAPI schema for [`crate::domain::PatientPageView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PatientPageView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PatientPageViewSchema {
    /// Matches before pagination.
    #[schema(example = 42)]
    total: u64,
    #[schema(example = 1)]
    page: u32,
    #[schema(example = 10)]
    per_page: u32,
    patients: Vec<PatientViewSchema>,
}

/// OpenAPI schema for [`crate::domain::CreatePatientRequest`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CreatePatientRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatePatientSchema {
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "12345678900")]
    personal_id: String,
    #[schema(example = "johndoe@example.com")]
    email: String,
    phone: Option<String>,
    gender: Option<String>,
    /// Parsed with the configured date pattern.
    #[schema(example = "1990-01-01")]
    birth_date: String,
    address: Option<AddressSchema>,
}

/// OpenAPI schema for [`crate::domain::UpdatePatientRequest`].
///
/// Absent, null and empty fields leave the stored value unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::UpdatePatientRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdatePatientSchema {
    name: Option<String>,
    personal_id: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    gender: Option<String>,
    birth_date: Option<String>,
    /// Replaces every field of the stored address.
    address: Option<AddressSchema>,
}
