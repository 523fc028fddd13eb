//! Client-facing projections of the patient aggregate.

use pagination::Page;
use serde::{Deserialize, Serialize};

use super::date_codec::{DateCodec, DateValue};
use super::patient::{Address, Patient};

/// Serializable view of a patient with its birth date rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientView {
    pub id: i32,
    pub personal_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: String,
    pub address: Option<Address>,
}

impl PatientView {
    /// Project a stored patient, rendering the birth date with `codec`.
    pub fn from_patient(patient: Patient, codec: &DateCodec) -> Self {
        let birth_date = codec
            .format_value(DateValue::Date(patient.birth_date))
            .into_owned();
        Self {
            id: patient.id.get(),
            personal_id: patient.personal_id,
            name: patient.name,
            email: patient.email,
            phone: patient.phone,
            gender: patient.gender,
            birth_date,
            address: patient.address,
        }
    }
}

/// Page envelope `{total, page, per_page, patients}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientPageView {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub patients: Vec<PatientView>,
}

impl From<Page<PatientView>> for PatientPageView {
    fn from(page: Page<PatientView>) -> Self {
        let request = page.request();
        Self {
            total: page.total(),
            page: request.page(),
            per_page: request.per_page(),
            patients: page.into_items(),
        }
    }
}
