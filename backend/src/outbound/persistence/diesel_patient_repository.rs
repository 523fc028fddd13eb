//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.
//!
//! Patients and addresses live in separate tables. Reads load the patient rows
//! first and then fetch their addresses with one extra query; writes touching
//! both tables run inside a single transaction. Updates lock the patient row
//! before reading it.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use pagination::Page;
use tracing::debug;

use crate::domain::ports::{PatientRepository, PatientRepositoryError, PatientUpdate};
use crate::domain::{NewPatient, Patient, PatientFilter, PatientId, PatientPatch};

use super::models::{AddressChanges, AddressRow, NewAddressRow, PatientChanges, PatientRow};
use super::pool::{DbPool, PoolError};
use super::schema::{address, patient};

/// Diesel-backed implementation of the `PatientRepository` port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain patient repository errors.
fn map_pool_error(error: PoolError) -> PatientRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PatientRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain patient repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PatientRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            PatientRepositoryError::unique_violation(
                info.constraint_name().unwrap_or("unique constraint"),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PatientRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => PatientRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PatientRepositoryError::query("database query error"),
        DieselError::DatabaseError(_, info) => PatientRepositoryError::query(info.message()),
        _ => PatientRepositoryError::query("database error"),
    }
}

/// Build a `LIKE` pattern matching `name` anywhere, with wildcards in the
/// input taken literally.
fn contains_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 2);
    pattern.push('%');
    for ch in name.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Patients matching the optional name filter.
fn filtered(filter: &PatientFilter) -> patient::BoxedQuery<'static, Pg> {
    let mut query = patient::table.into_boxed();
    if let Some(name) = filter.name() {
        query = query.filter(patient::name.like(contains_pattern(name)).escape('\\'));
    }
    query
}

/// Load the addresses belonging to `rows` and attach them.
async fn with_addresses(
    conn: &mut AsyncPgConnection,
    rows: Vec<PatientRow>,
) -> QueryResult<Vec<Patient>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let addresses: Vec<AddressRow> = AddressRow::belonging_to(&rows)
        .select(AddressRow::as_select())
        .load(conn)
        .await?;
    let grouped = addresses.grouped_by(&rows);
    Ok(rows
        .into_iter()
        .zip(grouped)
        .map(|(row, addresses)| row.into_patient(addresses.into_iter().next()))
        .collect())
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn find_page(
        &self,
        filter: &PatientFilter,
    ) -> Result<Page<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let request = filter.page();

        let (total, patients) = conn
            .transaction(|conn| {
                async move {
                    let total: i64 = filtered(filter).count().get_result(conn).await?;
                    let rows: Vec<PatientRow> = filtered(filter)
                        .order_by(patient::id.asc())
                        .limit(request.limit())
                        .offset(request.offset())
                        .select(PatientRow::as_select())
                        .load(conn)
                        .await?;
                    let patients = with_addresses(conn, rows).await?;
                    Ok((total, patients))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(total, request, patients))
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PatientRow> = patient::table
            .find(id.get())
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let patients = with_addresses(&mut conn, vec![row])
            .await
            .map_err(map_diesel_error)?;
        Ok(patients.into_iter().next())
    }

    async fn find_by_personal_id(
        &self,
        personal_id: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PatientRow> = patient::table
            .filter(patient::personal_id.eq(personal_id))
            .order_by(patient::id.asc())
            .select(PatientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let patients = with_addresses(&mut conn, vec![row])
            .await
            .map_err(map_diesel_error)?;
        Ok(patients.into_iter().next())
    }

    async fn insert(&self, new_patient: &NewPatient) -> Result<PatientId, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i32 = diesel::insert_into(patient::table)
                        .values(PatientChanges::from(new_patient))
                        .returning(patient::id)
                        .get_result(conn)
                        .await?;
                    if let Some(value) = &new_patient.address {
                        diesel::insert_into(address::table)
                            .values(NewAddressRow::new(id, value))
                            .execute(conn)
                            .await?;
                    }
                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(PatientId::new(id))
    }

    async fn update(
        &self,
        id: PatientId,
        patch: &PatientPatch,
    ) -> Result<PatientUpdate, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = id.get();

        conn.transaction(|conn| {
            async move {
                // Row lock held until commit; concurrent patches queue here.
                let row: Option<PatientRow> = patient::table
                    .find(id)
                    .select(PatientRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(row) = row else {
                    return Ok(PatientUpdate::NotFound);
                };
                let Some(mut stored) = with_addresses(conn, vec![row]).await?.into_iter().next()
                else {
                    return Ok(PatientUpdate::NotFound);
                };
                if let Err(err) = stored.apply(patch) {
                    return Ok(PatientUpdate::Rejected(err));
                }

                diesel::update(patient::table.find(id))
                    .set(PatientChanges::from(&stored))
                    .execute(conn)
                    .await?;
                if let Some(value) = &patch.address {
                    diesel::update(address::table.filter(address::patient_id.eq(id)))
                        .set(AddressChanges::from(value))
                        .execute(conn)
                        .await?;
                }
                Ok(PatientUpdate::Applied(stored))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The address row goes with it through ON DELETE CASCADE.
        let deleted = diesel::delete(patient::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
