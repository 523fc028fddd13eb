//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to and from domain types live
//! next to the rows so the repository only moves data around.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{Address, NewPatient, Patient, PatientId};

use super::schema::{address, patient};

/// Row struct for reading from the patient table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = patient)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: i32,
    pub name: String,
    pub personal_id: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: NaiveDate,
}

impl PatientRow {
    /// Attach the loaded address, if any, and convert to the domain aggregate.
    pub fn into_patient(self, address: Option<AddressRow>) -> Patient {
        Patient {
            id: PatientId::new(self.id),
            name: self.name,
            personal_id: self.personal_id,
            email: self.email,
            phone: self.phone,
            gender: self.gender,
            birth_date: self.birth_date,
            address: address.map(AddressRow::into_address),
        }
    }
}

/// Insertable and changeset struct for patient scalars.
///
/// `treat_none_as_null` makes an update write `NULL` for a cleared phone or
/// gender instead of skipping the column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = patient)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PatientChanges<'a> {
    pub name: &'a str,
    pub personal_id: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a NewPatient> for PatientChanges<'a> {
    fn from(value: &'a NewPatient) -> Self {
        Self {
            name: &value.name,
            personal_id: &value.personal_id,
            email: &value.email,
            phone: value.phone.as_deref(),
            gender: value.gender.as_deref(),
            birth_date: value.birth_date,
        }
    }
}

impl<'a> From<&'a Patient> for PatientChanges<'a> {
    fn from(value: &'a Patient) -> Self {
        Self {
            name: &value.name,
            personal_id: &value.personal_id,
            email: &value.email,
            phone: value.phone.as_deref(),
            gender: value.gender.as_deref(),
            birth_date: value.birth_date,
        }
    }
}

/// Row struct for reading from the address table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = address)]
#[diesel(belongs_to(PatientRow, foreign_key = patient_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i32,
    pub patient_id: i32,
    pub zipcode: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub number: String,
}

impl AddressRow {
    pub fn into_address(self) -> Address {
        Address {
            zipcode: self.zipcode,
            address: self.street,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            number: self.number,
        }
    }
}

/// Insertable struct for creating an address alongside its patient.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = address)]
pub(crate) struct NewAddressRow<'a> {
    pub patient_id: i32,
    pub zipcode: &'a str,
    pub street: &'a str,
    pub neighborhood: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub number: &'a str,
}

impl<'a> NewAddressRow<'a> {
    pub fn new(patient_id: i32, value: &'a Address) -> Self {
        Self {
            patient_id,
            zipcode: &value.zipcode,
            street: &value.address,
            neighborhood: &value.neighborhood,
            city: &value.city,
            state: &value.state,
            number: &value.number,
        }
    }
}

/// Changeset overwriting every scalar field of an existing address.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = address)]
pub(crate) struct AddressChanges<'a> {
    pub zipcode: &'a str,
    pub street: &'a str,
    pub neighborhood: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub number: &'a str,
}

impl<'a> From<&'a Address> for AddressChanges<'a> {
    fn from(value: &'a Address) -> Self {
        Self {
            zipcode: &value.zipcode,
            street: &value.address,
            neighborhood: &value.neighborhood,
            city: &value.city,
            state: &value.state,
            number: &value.number,
        }
    }
}
