//! Patient aggregate and the commands that create or change it.
//!
//! A [`Patient`] owns at most one [`Address`]. The address has no identity of
//! its own in the domain: it is created with the patient, overwritten in place
//! on update, and removed when the patient is deleted.

use std::fmt;

use chrono::NaiveDate;
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date_codec::{DateCodec, DateCodecError};

/// Surrogate key assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i32);

impl PatientId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier for adapters.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for PatientId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Postal address owned by exactly one patient.
///
/// All six fields are required; updates replace them together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub zipcode: String,
    /// Street name.
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    /// Street number, kept as text ("123A", "s/n").
    pub number: String,
}

/// A stored patient together with its optional address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub personal_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: NaiveDate,
    pub address: Option<Address>,
}

/// A validated patient that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub personal_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: NaiveDate,
    pub address: Option<Address>,
}

impl NewPatient {
    /// Attach the identifier the store assigned.
    pub fn into_patient(self, id: PatientId) -> Patient {
        Patient {
            id,
            name: self.name,
            personal_id: self.personal_id,
            email: self.email,
            phone: self.phone,
            gender: self.gender,
            birth_date: self.birth_date,
            address: self.address,
        }
    }
}

/// Raw creation payload. The birth date is still text at this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: String,
    pub personal_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    pub birth_date: String,
    #[serde(default)]
    pub address: Option<Address>,
}

impl CreatePatientRequest {
    /// Parse the birth date and produce an insertable patient.
    pub fn into_new_patient(self, codec: &DateCodec) -> Result<NewPatient, DateCodecError> {
        let birth_date = codec.parse(&self.birth_date)?;
        Ok(NewPatient {
            name: self.name,
            personal_id: self.personal_id,
            email: self.email,
            phone: self.phone,
            gender: self.gender,
            birth_date,
            address: self.address,
        })
    }
}

/// Partial update payload. Absent or empty fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub personal_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<Address>,
}

/// Reasons an update payload cannot be applied to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatientChangeError {
    /// The new birth date does not match the configured pattern.
    #[error(transparent)]
    BirthDate(#[from] DateCodecError),
    /// An address was supplied for a patient that has none stored.
    #[error("paciente não possui endereço cadastrado")]
    MissingAddress,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl UpdatePatientRequest {
    /// Drop empty fields and parse the birth date.
    pub fn into_patch(self, codec: &DateCodec) -> PatientPatch {
        PatientPatch {
            name: present(self.name),
            personal_id: present(self.personal_id),
            email: present(self.email),
            phone: present(self.phone),
            gender: present(self.gender),
            birth_date: present(self.birth_date).map(|raw| codec.parse(&raw)),
            address: self.address,
        }
    }
}

/// A partial update ready to be applied to a stored patient.
///
/// A birth date that failed to parse is kept and reported by
/// [`Patient::apply`], so an unknown patient is still reported as missing
/// before the payload is judged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub personal_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<Result<NaiveDate, DateCodecError>>,
    pub address: Option<Address>,
}

impl Patient {
    /// Overwrite the fields present in `patch`.
    ///
    /// The address is replaced as a whole and only when one is already stored;
    /// adding an address through an update is rejected. Nothing is modified
    /// when an error is returned.
    pub fn apply(&mut self, patch: &PatientPatch) -> Result<(), PatientChangeError> {
        let birth_date = patch.birth_date.clone().transpose()?;
        if patch.address.is_some() && self.address.is_none() {
            return Err(PatientChangeError::MissingAddress);
        }

        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(personal_id) = &patch.personal_id {
            self.personal_id.clone_from(personal_id);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if patch.phone.is_some() {
            self.phone.clone_from(&patch.phone);
        }
        if patch.gender.is_some() {
            self.gender.clone_from(&patch.gender);
        }
        if let Some(birth_date) = birth_date {
            self.birth_date = birth_date;
        }
        if patch.address.is_some() {
            self.address.clone_from(&patch.address);
        }
        Ok(())
    }
}

/// Listing criteria: a page selection and an optional name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientFilter {
    page: PageRequest,
    name: Option<String>,
}

impl PatientFilter {
    /// Build a filter. An empty name fragment means "no name filter".
    pub fn new(page: PageRequest, name: Option<String>) -> Self {
        Self {
            page,
            name: present(name),
        }
    }

    /// Page selection.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Case-sensitive substring matched against patient names.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether `patient` satisfies the name criterion.
    pub fn matches(&self, patient: &Patient) -> bool {
        self.name
            .as_deref()
            .is_none_or(|fragment| patient.name.contains(fragment))
    }
}
