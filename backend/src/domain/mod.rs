//! Domain primitives, ports and the patient use-case service.
//!
//! Purpose: define the patient aggregate and the value types that cross the
//! hexagonal boundary. Nothing in here knows about HTTP or SQL; adapters live
//! under `inbound` and `outbound`.
//!
//! Public surface:
//! - `Patient`, `Address`, `NewPatient` and the request payloads.
//! - `DateCodec` for the configurable birth date format.
//! - `StatusResponse` and `Outcome` for use-case results.
//! - `PatientService`, the `PatientUseCases` implementation.

pub mod date_codec;
pub mod patient;
pub mod patient_service;
pub mod patient_view;
pub mod ports;
pub mod status;

pub use self::date_codec::{
    DEFAULT_DATE_PATTERN, DateCodec, DateCodecError, DatePatternError, DateValue,
};
pub use self::patient::{
    Address, CreatePatientRequest, NewPatient, Patient, PatientChangeError, PatientFilter,
    PatientId, PatientPatch, UpdatePatientRequest,
};
pub use self::patient_service::{PatientService, messages};
pub use self::patient_view::{PatientPageView, PatientView};
pub use self::status::{Outcome, StatusResponse};
