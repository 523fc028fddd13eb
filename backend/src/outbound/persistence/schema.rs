//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When the
//! migrations change, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// Patient records.
    patient (id) {
        id -> Int4,
        #[max_length = 100]
        name -> Varchar,
        /// National personal identifier. Not unique.
        #[max_length = 15]
        personal_id -> Varchar,
        /// Unique across all patients (`patient_email_key`).
        #[max_length = 100]
        email -> Varchar,
        #[max_length = 10]
        phone -> Nullable<Varchar>,
        #[max_length = 20]
        gender -> Nullable<Varchar>,
        birth_date -> Date,
    }
}

diesel::table! {
    /// Postal address owned by at most one patient.
    ///
    /// `patient_id` is unique and cascades on delete, so a patient has zero or
    /// one address and never leaves an orphan behind.
    address (id) {
        id -> Int4,
        patient_id -> Int4,
        #[max_length = 20]
        zipcode -> Varchar,
        /// Street line. Renamed because a column may not share its table's name.
        #[sql_name = "address"]
        #[max_length = 200]
        street -> Varchar,
        #[max_length = 200]
        neighborhood -> Varchar,
        #[max_length = 100]
        city -> Varchar,
        #[max_length = 100]
        state -> Varchar,
        #[max_length = 10]
        number -> Varchar,
    }
}

diesel::joinable!(address -> patient (patient_id));
diesel::allow_tables_to_appear_in_same_query!(address, patient);
