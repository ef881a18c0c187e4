//! Identity resolution.
//!
//! [`IdentityController`] is the cache-aside front for the three registries:
//! - patients resolve from the store first and fall back to the identity registry on a miss
//! - full patient records always come from the civil registry
//! - practitioners resolve from the store first and fall back to the licensing registry
//! - establishments are served from the store only
//!
//! Collaborator failures are logged here with full detail and surfaced as coarse
//! [`IdentityError`] kinds.

use crate::calculator::{age, format_birth_date};
use crate::config::CoreConfig;
use crate::constants::FEATURE_DISABLE_UPSTREAM;
use crate::query::{IdentityKind, IdentityQuery};
use crate::store::{Lookup, Store, StoreError};
use crate::translate::{
    citizen_to_patient, civil_to_patient, expat_to_patient, license_to_practitioner,
};
use crate::upstream::{Registries, UpstreamError};
use crate::write_back::WriteBack;
use crate::{IdentityError, IdentityResult};
use identity_records::{
    Establishment, EstablishmentSummary, EstablishmentV2, PatientRecord, PractitionerRecord,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct IdentityController {
    store: Arc<dyn Store>,
    registries: Registries,
    write_back: WriteBack,
    config: Arc<CoreConfig>,
}

fn lookup_failed(e: StoreError) -> IdentityError {
    tracing::error!(error = %e, "store lookup failed");
    IdentityError::LookupInfo
}

fn establishment_lookup_failed(e: StoreError) -> IdentityError {
    match e {
        StoreError::Search(detail) => {
            tracing::debug!(%detail, "establishment search rejected");
            IdentityError::SearchInput
        }
        other => {
            tracing::error!(error = %other, "establishment lookup failed");
            IdentityError::LookupInfo
        }
    }
}

fn identity_fetch_failed(e: UpstreamError) -> IdentityError {
    match e {
        UpstreamError::BadDateOfBirth | UpstreamError::BadId => {
            tracing::info!(error = %e, "identity registry rejected the query");
            IdentityError::SearchInput
        }
        other => {
            tracing::error!(error = %other, "identity registry call failed");
            IdentityError::FetchingInfo
        }
    }
}

impl IdentityController {
    pub fn new(
        store: Arc<dyn Store>,
        registries: Registries,
        write_back: WriteBack,
        config: Arc<CoreConfig>,
    ) -> Self {
        Self {
            store,
            registries,
            write_back,
            config,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn feature_is_enabled(&self, name: &str) -> bool {
        self.config.features().is_enabled(name)
    }

    /// Resolves a patient by id and birth date.
    ///
    /// On a cache miss `query.birth_date` is rewritten to the calendar the registry expects (Hijri
    /// for citizens, Gregorian for expatriates) when the store knows it. Callers formatting the
    /// result afterwards see the rewritten value.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::LookupInfo`] if the store lookup fails
    /// - [`IdentityError::NotFound`] on a miss while upstream calls are disabled
    /// - [`IdentityError::SearchInput`] if the registry rejects the id or birth date
    /// - [`IdentityError::FetchingInfo`] for any other registry failure
    /// - [`IdentityError::UnknownKind`] if the id is neither citizen nor expatriate
    pub async fn resolve_patient(&self, query: &mut IdentityQuery) -> IdentityResult<PatientRecord> {
        let lookup = self
            .store
            .patient_by_id_and_dob(&query.id, &query.birth_date)
            .await
            .map_err(lookup_failed)?;

        let mut row = match lookup {
            Lookup::Hit(row) => return Ok(row),
            Lookup::Miss(row) => row,
        };

        if self.feature_is_enabled(FEATURE_DISABLE_UPSTREAM) {
            tracing::debug!(id = %query.id, "cache miss with upstream disabled");
            return Err(IdentityError::NotFound);
        }

        match query.kind() {
            IdentityKind::Citizen => {
                if let Some(date_h) = &row.date_h {
                    query.birth_date = date_h.clone();
                }
            }
            IdentityKind::Expat => {
                if let Some(date_g) = &row.date_g {
                    query.birth_date = date_g.clone();
                }
            }
            IdentityKind::Unknown => {}
        }

        self.fetch_identity(query, &mut row).await?;
        row.age = age(row.date_of_birth_g.as_deref());
        self.apply_iso_nationality(&mut row).await;

        self.write_back.enqueue(row.clone());
        Ok(row)
    }

    /// Cached patient by id. Never calls a registry.
    ///
    /// # Errors
    ///
    /// [`IdentityError::NotFound`] on a miss, [`IdentityError::LookupInfo`] if the store fails.
    pub async fn get_patient_by_id(&self, id: &str) -> IdentityResult<PatientRecord> {
        match self.store.patient_by_id(id).await.map_err(lookup_failed)? {
            Lookup::Hit(row) => Ok(row),
            Lookup::Miss(_) => Err(IdentityError::NotFound),
        }
    }

    /// Refreshes a patient from the identity registry and updates the stored row in place.
    ///
    /// The query birth date is used as given.
    ///
    /// # Errors
    ///
    /// Lookup and registry failures map as in [`Self::resolve_patient`]; a failed store update
    /// is [`IdentityError::UpdateInfo`].
    pub async fn update_patient(&self, query: &IdentityQuery) -> IdentityResult<()> {
        let mut row = self
            .store
            .patient_by_id(&query.id)
            .await
            .map_err(lookup_failed)?
            .into_inner();

        self.fetch_identity(query, &mut row).await?;
        row.age = age(row.date_of_birth_g.as_deref());

        if let Err(e) = self.store.update_patient(&row).await {
            tracing::error!(id = %query.id, error = %e, "patient update failed");
            return Err(IdentityError::UpdateInfo);
        }
        tracing::info!(id = %query.id, "patient refreshed from identity registry");
        Ok(())
    }

    /// Full person record from the civil registry. Never reads the cache.
    ///
    /// # Errors
    ///
    /// [`IdentityError::SearchInput`] if the registry rejects the request, otherwise
    /// [`IdentityError::FetchingInfo`] for registry or translation failures.
    pub async fn full_patient(&self, query: &IdentityQuery) -> IdentityResult<PatientRecord> {
        let record = match self.registries.civil.fetch_civil_record(&query.id).await {
            Ok(record) => record,
            Err(UpstreamError::Validation(detail)) => {
                tracing::info!(id = %query.id, %detail, "civil registry rejected the query");
                return Err(IdentityError::SearchInput);
            }
            Err(e) => {
                tracing::error!(id = %query.id, error = %e, "civil registry call failed");
                return Err(IdentityError::FetchingInfo);
            }
        };

        let mut row = PatientRecord::default();
        if let Err(e) = civil_to_patient(record, query.kind(), &mut row) {
            tracing::error!(id = %query.id, error = %e, "civil registry birth date unparsable");
            return Err(IdentityError::FetchingInfo);
        }
        row.age = age(row.date_of_birth_g.as_deref());

        self.write_back.enqueue(row.clone());
        Ok(row)
    }

    /// Resolves a practitioner by id, fetching from the licensing registry on a miss.
    ///
    /// A freshly fetched practitioner is inserted synchronously and then re-read, so the caller
    /// gets the row as normalized by the store.
    ///
    /// # Errors
    ///
    /// - [`IdentityError::LookupInfo`] if either store read fails
    /// - [`IdentityError::Registry`] with the licensing registry's error
    /// - [`IdentityError::NotFound`] if the row is still missing after insertion
    pub async fn get_practitioner(&self, id: &str) -> IdentityResult<PractitionerRecord> {
        let mut row = match self.store.practitioner_by_id(id).await.map_err(lookup_failed)? {
            Lookup::Hit(row) => return Ok(row),
            Lookup::Miss(row) => row,
        };

        let license = self
            .registries
            .licensing
            .fetch_practitioner_license(id)
            .await
            .map_err(|e| {
                tracing::warn!(id, error = %e, "licensing registry call failed");
                IdentityError::Registry(e)
            })?;
        license_to_practitioner(license, id, &mut row);

        if let Err(e) = self.store.insert_practitioner(&row).await {
            tracing::error!(id, error = %e, "practitioner insert failed");
        }

        match self.store.practitioner_by_id(id).await.map_err(lookup_failed)? {
            Lookup::Hit(row) => Ok(row),
            Lookup::Miss(_) => Err(IdentityError::NotFound),
        }
    }

    /// # Errors
    ///
    /// [`IdentityError::NotFound`] when no row has `id`.
    pub async fn establishment(&self, id: &str) -> IdentityResult<Establishment> {
        self.store
            .establishment(id)
            .await
            .map_err(establishment_lookup_failed)?
            .ok_or(IdentityError::NotFound)
    }

    /// # Errors
    ///
    /// [`IdentityError::NotFound`] when no row has `id`.
    pub async fn establishment_v2(&self, id: &str) -> IdentityResult<EstablishmentV2> {
        self.store
            .establishment_v2(id)
            .await
            .map_err(establishment_lookup_failed)?
            .ok_or(IdentityError::NotFound)
    }

    pub async fn establishments(&self) -> IdentityResult<Vec<EstablishmentSummary>> {
        self.store
            .establishments()
            .await
            .map_err(establishment_lookup_failed)
    }

    pub async fn establishments_v2(&self) -> IdentityResult<Vec<EstablishmentV2>> {
        self.store
            .establishments_v2()
            .await
            .map_err(establishment_lookup_failed)
    }

    /// # Errors
    ///
    /// [`IdentityError::SearchInput`] if `organization_id` or `code` is empty,
    /// [`IdentityError::UpdateInfo`] if the store rejects the update.
    pub async fn update_establishment(&self, establishment: &Establishment) -> IdentityResult<()> {
        if let Err(e) = establishment.validate() {
            tracing::info!(error = %e, "establishment update rejected");
            return Err(IdentityError::SearchInput);
        }
        if let Err(e) = self.store.update_establishment(establishment).await {
            tracing::error!(error = %e, "establishment update failed");
            return Err(IdentityError::UpdateInfo);
        }
        Ok(())
    }

    async fn fetch_identity(
        &self,
        query: &IdentityQuery,
        row: &mut PatientRecord,
    ) -> IdentityResult<()> {
        let birth_date = format_birth_date(&query.birth_date);
        match query.kind() {
            IdentityKind::Citizen => {
                let info = self
                    .registries
                    .identity
                    .fetch_citizen(&query.id, &birth_date)
                    .await
                    .map_err(identity_fetch_failed)?;
                citizen_to_patient(info, row);
            }
            IdentityKind::Expat => {
                let info = self
                    .registries
                    .identity
                    .fetch_expat(&query.id, &birth_date)
                    .await
                    .map_err(identity_fetch_failed)?;
                expat_to_patient(info, row);
            }
            IdentityKind::Unknown => return Err(IdentityError::UnknownKind),
        }
        Ok(())
    }

    async fn apply_iso_nationality(&self, row: &mut PatientRecord) {
        let Some(nationality) = row.nationality.clone() else {
            return;
        };
        match self.store.country_by_nationality(&nationality).await {
            Ok(Some(country)) => {
                row.nationality_code = country.code;
                row.nationality = country.country_name_en;
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(%nationality, error = %e, "nationality lookup failed"),
        }
    }
}
