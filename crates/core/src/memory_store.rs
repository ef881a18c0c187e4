//! In-memory [`Store`] implementation.
//!
//! Backs the development binary and the test suite. It behaves like the SQL store in the ways
//! the controller can observe:
//! - patient and practitioner inserts are upserts keyed by `id_number`; a patient upsert keeps
//!   the stored `health_id`, `reserved_health_id`, `date_g` and `date_h` the new row lacks
//! - practitioner inserts are normalized (full names, row timestamps, row id)
//! - a patient miss returns the calendar hints known for the id
//! - nationality lookups ignore case, as the production collation does
//!
//! Rows can be seeded from a JSON file at startup.

use crate::calculator::format_birth_date;
use crate::store::{Lookup, Store, StoreError, StoreResult};
use crate::{IdentityError, IdentityResult};
use async_trait::async_trait;
use chrono::Utc;
use identity_records::{
    Establishment, EstablishmentSummary, EstablishmentV2, IsoCountryCode, PatientRecord,
    PractitionerRecord,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// JSON layout accepted by [`MemoryStore::from_seed_file`]. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub patients: Vec<PatientRecord>,
    /// Partial rows returned on a patient miss, keyed by their `id_number`.
    pub birth_date_hints: Vec<PatientRecord>,
    pub practitioners: Vec<PractitionerRecord>,
    pub countries: Vec<IsoCountryCode>,
    pub establishments: Vec<Establishment>,
    pub establishments_v2: Vec<EstablishmentV2>,
}

#[derive(Debug, Default)]
struct Tables {
    patients: HashMap<String, PatientRecord>,
    hints: HashMap<String, PatientRecord>,
    practitioners: HashMap<String, PractitionerRecord>,
    next_practitioner_row: i64,
    countries: HashMap<String, IsoCountryCode>,
    establishments: BTreeMap<String, Establishment>,
    establishments_v2: BTreeMap<String, EstablishmentV2>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a parsed seed. Rows without the key they are indexed by are skipped.
    pub fn from_seed(seed: StoreSeed) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().unwrap_or_else(|e| e.into_inner());
            for patient in seed.patients {
                if let Some(id) = patient.id_number.clone() {
                    tables.patients.insert(id, patient);
                }
            }
            for hint in seed.birth_date_hints {
                if let Some(id) = hint.id_number.clone() {
                    tables.hints.insert(id, hint);
                }
            }
            for practitioner in seed.practitioners {
                if let Some(id) = practitioner.id_number.clone() {
                    tables.next_practitioner_row += 1;
                    let mut row = practitioner;
                    row.id = tables.next_practitioner_row;
                    tables.practitioners.insert(id, row);
                }
            }
            for country in seed.countries {
                tables
                    .countries
                    .insert(country.nationality.to_lowercase(), country);
            }
            for est in seed.establishments {
                if let Some(id) = est.id.clone() {
                    tables.establishments.insert(id, est);
                }
            }
            for est in seed.establishments_v2 {
                if let Some(id) = est.organization_id.clone() {
                    tables.establishments_v2.insert(id, est);
                }
            }
        }
        store
    }

    /// Reads and parses a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_seed_file(path: &Path) -> IdentityResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            IdentityError::InvalidConfig(format!("cannot read seed file {}: {e}", path.display()))
        })?;
        let seed: StoreSeed = serde_json::from_str(&raw).map_err(|e| {
            IdentityError::InvalidConfig(format!("cannot parse seed file {}: {e}", path.display()))
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Registers the partial row returned when `id` misses the patient cache.
    pub fn remember_birth_dates(&self, id: &str, date_g: Option<&str>, date_h: Option<&str>) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.hints.insert(
            id.to_string(),
            PatientRecord {
                id_number: Some(id.to_string()),
                date_g: date_g.map(str::to_string),
                date_h: date_h.map(str::to_string),
                ..Default::default()
            },
        );
    }

    pub fn add_country(&self, country: IsoCountryCode) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables
            .countries
            .insert(country.nationality.to_lowercase(), country);
    }

    pub fn add_establishment(&self, est: Establishment) {
        if let Some(id) = est.id.clone() {
            let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
            tables.establishments.insert(id, est);
        }
    }

    /// Cached patient row by id, bypassing the lookup rules.
    pub fn patient(&self, id: &str) -> Option<PatientRecord> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.patients.get(id).cloned()
    }

    pub fn patient_count(&self) -> usize {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.patients.len()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }

    /// Partial row for a miss. A row cached under another birth date lends its bookkeeping
    /// columns so the write-back after the registry call does not drop them.
    fn miss_row(tables: &Tables, id: &str) -> PatientRecord {
        let mut row = tables.hints.get(id).cloned().unwrap_or_default();
        if let Some(cached) = tables.patients.get(id) {
            row.id_number.get_or_insert_with(|| id.to_string());
            take_bookkeeping(&mut row, cached);
        }
        row
    }
}

fn birth_date_matches(row: &PatientRecord, birth_date: &str) -> bool {
    let reshaped = format_birth_date(birth_date);
    [
        &row.date_of_birth_g,
        &row.date_of_birth_h,
        &row.date_g,
        &row.date_h,
    ]
    .into_iter()
    .flatten()
    .any(|stored| stored == birth_date || *stored == reshaped)
}

/// Store-held columns no registry fills. `cached` wins; `row` keeps what `cached` lacks.
fn take_bookkeeping(row: &mut PatientRecord, cached: &PatientRecord) {
    for (into, from) in [
        (&mut row.health_id, &cached.health_id),
        (&mut row.reserved_health_id, &cached.reserved_health_id),
        (&mut row.date_g, &cached.date_g),
        (&mut row.date_h, &cached.date_h),
    ] {
        if from.is_some() {
            into.clone_from(from);
        }
    }
}

/// Store-held columns of `existing` that `incoming` leaves empty.
fn keep_bookkeeping(incoming: &mut PatientRecord, existing: &PatientRecord) {
    for (into, from) in [
        (&mut incoming.health_id, &existing.health_id),
        (&mut incoming.reserved_health_id, &existing.reserved_health_id),
        (&mut incoming.date_g, &existing.date_g),
        (&mut incoming.date_h, &existing.date_h),
    ] {
        if into.is_none() {
            into.clone_from(from);
        }
    }
}

fn join_names(parts: [&Option<String>; 4]) -> Option<String> {
    let joined = parts
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

#[async_trait]
impl Store for MemoryStore {
    async fn patient_by_id_and_dob(
        &self,
        id: &str,
        birth_date: &str,
    ) -> StoreResult<Lookup<PatientRecord>> {
        if id.is_empty() || birth_date.is_empty() {
            return Err(StoreError::Search("id and birth date are required".into()));
        }
        let tables = self.read()?;
        match tables.patients.get(id) {
            Some(row) if birth_date_matches(row, birth_date) => Ok(Lookup::Hit(row.clone())),
            _ => Ok(Lookup::Miss(Self::miss_row(&tables, id))),
        }
    }

    async fn patient_by_id(&self, id: &str) -> StoreResult<Lookup<PatientRecord>> {
        if id.is_empty() {
            return Err(StoreError::Search("id is required".into()));
        }
        let tables = self.read()?;
        match tables.patients.get(id) {
            Some(row) => Ok(Lookup::Hit(row.clone())),
            None => Ok(Lookup::Miss(Self::miss_row(&tables, id))),
        }
    }

    async fn insert_patient(&self, patient: &PatientRecord) -> StoreResult<()> {
        let id = patient
            .id_number
            .clone()
            .ok_or_else(|| StoreError::Backend("patient row has no id_number".into()))?;
        let mut row = patient.clone();
        let mut tables = self.write()?;
        if let Some(existing) = tables.patients.get(&id) {
            keep_bookkeeping(&mut row, existing);
        }
        tables.patients.insert(id, row);
        Ok(())
    }

    async fn update_patient(&self, patient: &PatientRecord) -> StoreResult<()> {
        let id = patient
            .id_number
            .as_deref()
            .ok_or_else(|| StoreError::Backend("patient row has no id_number".into()))?;
        let mut tables = self.write()?;
        match tables.patients.get_mut(id) {
            Some(row) => {
                *row = patient.clone();
                Ok(())
            }
            None => Err(StoreError::Backend(format!("no patient row for {id}"))),
        }
    }

    async fn practitioner_by_id(&self, id: &str) -> StoreResult<Lookup<PractitionerRecord>> {
        if id.is_empty() {
            return Err(StoreError::Search("id is required".into()));
        }
        let tables = self.read()?;
        Ok(match tables.practitioners.get(id) {
            Some(row) => Lookup::Hit(row.clone()),
            None => Lookup::Miss(PractitionerRecord::default()),
        })
    }

    async fn insert_practitioner(&self, practitioner: &PractitionerRecord) -> StoreResult<()> {
        let id = practitioner
            .id_number
            .clone()
            .ok_or_else(|| StoreError::Backend("practitioner row has no id_number".into()))?;

        let now = Utc::now().to_rfc3339();
        let mut row = practitioner.clone();
        row.full_name_ar = join_names([
            &row.first_name_ar,
            &row.second_name_ar,
            &row.third_name_ar,
            &row.last_name_ar,
        ]);
        row.full_name_en = join_names([
            &row.first_name_en,
            &row.second_name_en,
            &row.third_name_en,
            &row.last_name_en,
        ]);
        row.row_updated_at = Some(now.clone());

        let mut tables = self.write()?;
        match tables.practitioners.get(&id) {
            Some(existing) => {
                row.id = existing.id;
                row.row_inserted_at = existing.row_inserted_at.clone();
            }
            None => {
                tables.next_practitioner_row += 1;
                row.id = tables.next_practitioner_row;
                row.row_inserted_at = Some(now);
            }
        }
        tables.practitioners.insert(id, row);
        Ok(())
    }

    async fn country_by_nationality(
        &self,
        nationality: &str,
    ) -> StoreResult<Option<IsoCountryCode>> {
        let tables = self.read()?;
        Ok(tables.countries.get(&nationality.to_lowercase()).cloned())
    }

    async fn establishment(&self, id: &str) -> StoreResult<Option<Establishment>> {
        if id.is_empty() {
            return Err(StoreError::Search("id is required".into()));
        }
        Ok(self.read()?.establishments.get(id).cloned())
    }

    async fn establishment_v2(&self, id: &str) -> StoreResult<Option<EstablishmentV2>> {
        if id.is_empty() {
            return Err(StoreError::Search("id is required".into()));
        }
        Ok(self.read()?.establishments_v2.get(id).cloned())
    }

    async fn establishments(&self) -> StoreResult<Vec<EstablishmentSummary>> {
        Ok(self
            .read()?
            .establishments
            .values()
            .map(EstablishmentSummary::from)
            .collect())
    }

    async fn establishments_v2(&self) -> StoreResult<Vec<EstablishmentV2>> {
        Ok(self.read()?.establishments_v2.values().cloned().collect())
    }

    async fn update_establishment(&self, establishment: &Establishment) -> StoreResult<()> {
        let mut tables = self.write()?;
        let existing = tables.establishments.iter_mut().find(|(_, row)| {
            row.organization_id == establishment.organization_id && row.code == establishment.code
        });
        match existing {
            Some((id, row)) => {
                let mut updated = establishment.clone();
                updated.id = Some(id.clone());
                updated.row_updated_at = Some(Utc::now().to_rfc3339());
                *row = updated;
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "no establishment with organization_id {:?} and code {:?}",
                establishment.organization_id, establishment.code
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn patient(id: &str, dob_g: &str) -> PatientRecord {
        PatientRecord {
            id_number: Some(id.into()),
            date_of_birth_g: Some(dob_g.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn hit_requires_matching_birth_date_in_either_layout() {
        let store = MemoryStore::new();
        store.insert_patient(&patient("2123456789", "21-07-1963")).await.unwrap();

        let hit = store.patient_by_id_and_dob("2123456789", "1963-07-21").await.unwrap();
        assert!(hit.is_hit());

        let miss = store.patient_by_id_and_dob("2123456789", "22-07-1963").await.unwrap();
        assert!(!miss.is_hit());
    }

    #[tokio::test]
    async fn miss_carries_calendar_hints() {
        let store = MemoryStore::new();
        store.remember_birth_dates("1012345678", Some("21-07-1963"), Some("01-03-1383"));

        let lookup = store.patient_by_id_and_dob("1012345678", "1963").await.unwrap();
        match lookup {
            Lookup::Miss(row) => assert_eq!(row.date_h.as_deref(), Some("01-03-1383")),
            Lookup::Hit(_) => panic!("expected a miss"),
        }
    }

    #[tokio::test]
    async fn empty_search_arguments_are_rejected() {
        let store = MemoryStore::new();
        let err = store.patient_by_id_and_dob("", "01-01-1990").await.unwrap_err();
        assert!(matches!(err, StoreError::Search(_)));
    }

    #[tokio::test]
    async fn patient_insert_is_an_upsert_by_id() {
        let store = MemoryStore::new();
        store.insert_patient(&patient("2123456789", "01-01-1990")).await.unwrap();
        store.insert_patient(&patient("2123456789", "02-01-1990")).await.unwrap();

        assert_eq!(store.patient_count(), 1);
        let row = store.patient("2123456789").unwrap();
        assert_eq!(row.date_of_birth_g.as_deref(), Some("02-01-1990"));
    }

    #[tokio::test]
    async fn miss_on_other_birth_date_keeps_cached_bookkeeping() {
        let store = MemoryStore::new();
        let mut cached = patient("1012345678", "21-07-1963");
        cached.health_id = Some("H-1".into());
        cached.date_g = Some("21-07-1963".into());
        store.insert_patient(&cached).await.unwrap();
        store.remember_birth_dates("1012345678", None, Some("01-03-1383"));

        let row = store
            .patient_by_id_and_dob("1012345678", "02-03-1383")
            .await
            .unwrap();
        assert!(!row.is_hit());
        let row = row.into_inner();
        assert_eq!(row.health_id.as_deref(), Some("H-1"));
        assert_eq!(row.date_g.as_deref(), Some("21-07-1963"));
        assert_eq!(row.date_h.as_deref(), Some("01-03-1383"));
    }

    #[tokio::test]
    async fn upsert_keeps_bookkeeping_the_new_row_lacks() {
        let store = MemoryStore::new();
        let mut cached = patient("1012345678", "21-07-1963");
        cached.health_id = Some("H-1".into());
        cached.reserved_health_id = Some("R-1".into());
        store.insert_patient(&cached).await.unwrap();

        let mut fresh = patient("1012345678", "21-07-1963");
        fresh.reserved_health_id = Some("R-2".into());
        fresh.first_name_en = Some("Sara".into());
        store.insert_patient(&fresh).await.unwrap();

        let row = store.patient("1012345678").unwrap();
        assert_eq!(row.health_id.as_deref(), Some("H-1"));
        assert_eq!(row.reserved_health_id.as_deref(), Some("R-2"));
        assert_eq!(row.first_name_en.as_deref(), Some("Sara"));
    }

    #[tokio::test]
    async fn update_requires_an_existing_row() {
        let store = MemoryStore::new();
        let err = store.update_patient(&patient("2123456789", "01-01-1990")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn practitioner_insert_normalizes_full_names() {
        let store = MemoryStore::new();
        let row = PractitionerRecord {
            id_number: Some("1012345678".into()),
            first_name_en: Some("Sara".into()),
            second_name_en: Some("".into()),
            last_name_en: Some("Ali".into()),
            ..Default::default()
        };
        store.insert_practitioner(&row).await.unwrap();

        let stored = store.practitioner_by_id("1012345678").await.unwrap().into_inner();
        assert_eq!(stored.full_name_en.as_deref(), Some("Sara Ali"));
        assert_eq!(stored.full_name_ar, None);
        assert_eq!(stored.id, 1);
        assert!(stored.row_updated_at.is_some());
    }

    #[tokio::test]
    async fn nationality_lookup_ignores_case() {
        let store = MemoryStore::new();
        store.add_country(IsoCountryCode {
            nationality: "Egyptian".into(),
            code: Some("EGY".into()),
            country_name_en: Some("Egypt".into()),
        });

        let hit = store.country_by_nationality("EGYPTIAN").await.unwrap();
        assert_eq!(hit.and_then(|c| c.code).as_deref(), Some("EGY"));
        assert_eq!(store.country_by_nationality("Martian").await.unwrap(), None);
    }

    #[tokio::test]
    async fn seed_file_populates_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "patients": [{{ "id_number": "1012345678", "date_g": "21-07-1963" }}],
                "countries": [{{ "nationality": "Saudi", "code": "SAU", "country_name_en": "Saudi Arabia" }}],
                "establishments": [{{ "id": "7", "code": "C7", "organization_id": "O7" }}]
            }}"#
        )
        .unwrap();

        let store = MemoryStore::from_seed_file(file.path()).unwrap();
        assert!(store.patient("1012345678").is_some());
        assert!(store.establishment("7").await.unwrap().is_some());
        assert_eq!(store.establishments().await.unwrap().len(), 1);
    }

    #[test]
    fn unreadable_seed_file_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = MemoryStore::from_seed_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidConfig(_)));
    }
}
