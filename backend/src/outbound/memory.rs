//! In-memory `PatientRepository` for tests and database-less runs.
//!
//! Mirrors the PostgreSQL schema rules: identifiers are assigned from a
//! sequence starting at 1, e-mail addresses are unique, and removing a
//! patient removes its address with it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pagination::Page;
use tokio::sync::RwLock;

use crate::domain::ports::{PatientRepository, PatientRepositoryError, PatientUpdate};
use crate::domain::{NewPatient, Patient, PatientFilter, PatientId, PatientPatch};

/// Name reported for e-mail collisions, matching the database constraint.
const EMAIL_CONSTRAINT: &str = "patient_email_key";

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    patients: BTreeMap<PatientId, Patient>,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<PatientId>) -> bool {
        self.patients
            .values()
            .any(|patient| patient.email == email && Some(patient.id) != except)
    }
}

/// Patient store held in process memory behind a `tokio` read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    store: RwLock<Store>,
}

impl InMemoryPatientRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored patients.
    pub async fn len(&self) -> usize {
        self.store.read().await.patients.len()
    }

    /// Whether the repository holds no patients.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.patients.is_empty()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn find_page(
        &self,
        filter: &PatientFilter,
    ) -> Result<Page<Patient>, PatientRepositoryError> {
        let store = self.store.read().await;
        let request = filter.page();
        let matching: Vec<&Patient> = store
            .patients
            .values()
            .filter(|patient| filter.matches(patient))
            .collect();
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(limit)
            .map(|patient| (*patient).clone())
            .collect();
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        Ok(Page::new(total, request, items))
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, PatientRepositoryError> {
        Ok(self.store.read().await.patients.get(&id).cloned())
    }

    async fn find_by_personal_id(
        &self,
        personal_id: &str,
    ) -> Result<Option<Patient>, PatientRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .patients
            .values()
            .find(|patient| patient.personal_id == personal_id)
            .cloned())
    }

    async fn insert(&self, patient: &NewPatient) -> Result<PatientId, PatientRepositoryError> {
        let mut store = self.store.write().await;
        if store.email_taken(&patient.email, None) {
            return Err(PatientRepositoryError::unique_violation(EMAIL_CONSTRAINT));
        }
        store.next_id += 1;
        let id = PatientId::new(store.next_id);
        store.patients.insert(id, patient.clone().into_patient(id));
        Ok(id)
    }

    async fn update(
        &self,
        id: PatientId,
        patch: &PatientPatch,
    ) -> Result<PatientUpdate, PatientRepositoryError> {
        let mut store = self.store.write().await;
        let Some(mut patient) = store.patients.get(&id).cloned() else {
            return Ok(PatientUpdate::NotFound);
        };
        if let Err(err) = patient.apply(patch) {
            return Ok(PatientUpdate::Rejected(err));
        }
        if store.email_taken(&patient.email, Some(id)) {
            return Err(PatientRepositoryError::unique_violation(EMAIL_CONSTRAINT));
        }
        store.patients.insert(id, patient.clone());
        Ok(PatientUpdate::Applied(patient))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, PatientRepositoryError> {
        Ok(self.store.write().await.patients.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    use crate::domain::Address;

    fn new_patient(name: &str, email: &str) -> NewPatient {
        NewPatient {
            name: name.to_owned(),
            personal_id: "12345678900".to_owned(),
            email: email.to_owned(),
            phone: None,
            gender: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 20).expect("date"),
            address: Some(Address {
                zipcode: "12345-678".to_owned(),
                address: "Rua A".to_owned(),
                neighborhood: "Centro".to_owned(),
                city: "Recife".to_owned(),
                state: "PE".to_owned(),
                number: "10".to_owned(),
            }),
        }
    }

    fn filter(page: u32, per_page: u32, name: Option<&str>) -> PatientFilter {
        PatientFilter::new(
            PageRequest::new(page, per_page).expect("valid page"),
            name.map(str::to_owned),
        )
    }

    #[fixture]
    fn repo() -> InMemoryPatientRepository {
        InMemoryPatientRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(repo: InMemoryPatientRepository) {
        let first = repo.insert(&new_patient("Ana", "ana@example.com")).await;
        let second = repo.insert(&new_patient("Bia", "bia@example.com")).await;

        assert_eq!(first, Ok(PatientId::new(1)));
        assert_eq!(second, Ok(PatientId::new(2)));
        assert_eq!(repo.len().await, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_email(repo: InMemoryPatientRepository) {
        repo.insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("first insert");

        let err = repo
            .insert(&new_patient("Ana Clone", "ana@example.com"))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, PatientRepositoryError::unique_violation("patient_email_key"));
        assert_eq!(repo.len().await, 1);
    }

    fn patch() -> PatientPatch {
        PatientPatch::default()
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_email_of_another_patient(repo: InMemoryPatientRepository) {
        repo.insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("insert");
        let id = repo
            .insert(&new_patient("Bia", "bia@example.com"))
            .await
            .expect("insert");

        let renamed = PatientPatch {
            name: Some("Beatriz".to_owned()),
            ..patch()
        };
        let applied = repo.update(id, &renamed).await.expect("update");
        assert!(matches!(applied, PatientUpdate::Applied(p) if p.name == "Beatriz"));

        let stolen = PatientPatch {
            email: Some("ana@example.com".to_owned()),
            ..patch()
        };
        assert!(matches!(
            repo.update(id, &stolen).await,
            Err(PatientRepositoryError::UniqueViolation { .. })
        ));
        let stored = repo.find_by_id(id).await.expect("find").expect("present");
        assert_eq!(stored.email, "bia@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_patient_reports_not_found(repo: InMemoryPatientRepository) {
        assert_eq!(
            repo.update(PatientId::new(42), &patch()).await,
            Ok(PatientUpdate::NotFound)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_patches_keep_each_others_fields(repo: InMemoryPatientRepository) {
        let id = repo
            .insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("insert");
        let rename = PatientPatch {
            name: Some("Ana Maria".to_owned()),
            ..patch()
        };
        let rephone = PatientPatch {
            phone: Some("988887777".to_owned()),
            ..patch()
        };

        let (first, second) = tokio::join!(repo.update(id, &rename), repo.update(id, &rephone));
        assert!(matches!(first, Ok(PatientUpdate::Applied(_))));
        assert!(matches!(second, Ok(PatientUpdate::Applied(_))));

        let stored = repo.find_by_id(id).await.expect("find").expect("present");
        assert_eq!(stored.name, "Ana Maria");
        assert_eq!(stored.phone.as_deref(), Some("988887777"));
    }

    #[rstest]
    #[tokio::test]
    async fn find_page_counts_before_paginating(repo: InMemoryPatientRepository) {
        for (name, email) in [
            ("John Doe", "john@example.com"),
            ("Jane Roe", "jane@example.com"),
            ("John Smith", "smith@example.com"),
            ("Johnny Cash", "cash@example.com"),
        ] {
            repo.insert(&new_patient(name, email)).await.expect("insert");
        }

        let page = repo
            .find_page(&filter(2, 2, Some("John")))
            .await
            .expect("page");

        assert_eq!(page.total(), 3);
        let names: Vec<_> = page.items().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Johnny Cash"]);
    }

    #[rstest]
    #[tokio::test]
    async fn find_page_beyond_the_end_is_empty_with_total(repo: InMemoryPatientRepository) {
        repo.insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("insert");

        let page = repo.find_page(&filter(5, 10, None)).await.expect("page");

        assert_eq!(page.total(), 1);
        assert!(page.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_patient_and_address(repo: InMemoryPatientRepository) {
        let id = repo
            .insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("insert");

        assert_eq!(repo.delete(id).await, Ok(true));
        assert_eq!(repo.find_by_id(id).await, Ok(None));
        assert!(repo.is_empty().await);
        assert_eq!(repo.delete(id).await, Ok(false));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_personal_id_returns_first_match(repo: InMemoryPatientRepository) {
        repo.insert(&new_patient("Ana", "ana@example.com"))
            .await
            .expect("insert");
        repo.insert(&new_patient("Bia", "bia@example.com"))
            .await
            .expect("insert");

        let found = repo
            .find_by_personal_id("12345678900")
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(found.id, PatientId::new(1));
        assert_eq!(repo.find_by_personal_id("nope").await, Ok(None));
    }
}
