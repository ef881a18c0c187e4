//! Canonical record shapes for the identity hub.
//!
//! This crate provides the **storage/wire models** shared by the resolution core and the REST
//! layer:
//! - the canonical patient and practitioner records
//! - establishment rows (v1 single, v1 list summary, v2)
//! - ISO country lookup rows
//! - the payloads returned by each upstream registry
//! - the legacy and v2 compatibility shapes emitted to older consumers
//!
//! Every attribute is an `Option` so that "unknown" and "empty string" stay distinct. Field
//! presence on the wire is chosen per field: omitted when absent, emitted as `null`, or never
//! serialized at all for internal-only columns.

pub mod compat;
pub mod country;
pub mod establishment;
pub mod patient;
pub mod payloads;
pub mod practitioner;

pub use compat::{CompatCitizen, CompatCitizenV2, CompatExpat, CompatExpatV2, CompatPatient};
pub use country::IsoCountryCode;
pub use establishment::{Establishment, EstablishmentSummary, EstablishmentV2};
pub use patient::PatientRecord;
pub use payloads::{
    AlienInfo, CitizenInfo, CivilRecord, CodedName, LicenseStatus, PersonName, PractitionerLicense,
};
pub use practitioner::PractitionerRecord;

/// Errors returned when a record fails its own structural checks.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("organization_id can't be empty in establishment")]
    EmptyOrganizationId,

    #[error("code can't be empty in establishment")]
    EmptyCode,
}

/// Type alias for Results that can fail with a [`RecordError`].
pub type RecordResult<T> = Result<T, RecordError>;
