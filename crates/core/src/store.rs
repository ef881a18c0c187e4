//! Local persistent cache interface.
//!
//! The store is the cache in front of the registries and the system of record for
//! establishments. Implementations own connection handling; the controller treats the store as
//! a stateless shared resource and never holds a transaction across calls.

use async_trait::async_trait;
use identity_records::{
    Establishment, EstablishmentSummary, EstablishmentV2, IsoCountryCode, PatientRecord,
    PractitionerRecord,
};

/// Outcome of a cache read.
///
/// A miss still carries a row: whatever the store could say about the identity without a full
/// cached record, such as calendar-synced birth dates or a reserved health id. It is
/// `Default` when the store knows nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Hit(T),
    Miss(T),
}

impl<T> Lookup<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Lookup::Hit(row) | Lookup::Miss(row) => row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The search arguments were rejected before reaching storage.
    #[error("search input error: {0}")]
    Search(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage operations the controller depends on.
///
/// Inserts must be idempotent per identity (upsert by id): background write-backs from
/// concurrent resolutions of the same identity race each other.
#[async_trait]
pub trait Store: Send + Sync {
    async fn patient_by_id_and_dob(
        &self,
        id: &str,
        birth_date: &str,
    ) -> StoreResult<Lookup<PatientRecord>>;

    async fn patient_by_id(&self, id: &str) -> StoreResult<Lookup<PatientRecord>>;

    async fn insert_patient(&self, patient: &PatientRecord) -> StoreResult<()>;

    async fn update_patient(&self, patient: &PatientRecord) -> StoreResult<()>;

    async fn practitioner_by_id(&self, id: &str) -> StoreResult<Lookup<PractitionerRecord>>;

    async fn insert_practitioner(&self, practitioner: &PractitionerRecord) -> StoreResult<()>;

    /// ISO code for a free-text nationality, `None` when unmapped.
    async fn country_by_nationality(&self, nationality: &str)
        -> StoreResult<Option<IsoCountryCode>>;

    async fn establishment(&self, id: &str) -> StoreResult<Option<Establishment>>;

    async fn establishment_v2(&self, id: &str) -> StoreResult<Option<EstablishmentV2>>;

    async fn establishments(&self) -> StoreResult<Vec<EstablishmentSummary>>;

    async fn establishments_v2(&self) -> StoreResult<Vec<EstablishmentV2>>;

    async fn update_establishment(&self, establishment: &Establishment) -> StoreResult<()>;
}
