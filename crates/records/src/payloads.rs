//! Payloads returned by the upstream registries.
//!
//! Each registry speaks its own schema. These types mirror what the registry clients decode;
//! the translators in the core crate map them onto the canonical records. Registry responses
//! always carry every field (possibly empty), so fields here are plain `String`s.

use serde::{Deserialize, Serialize};

/// Citizen lookup result from the identity registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CitizenInfo {
    #[serde(rename = "nationalID")]
    pub national_id: String,
    #[serde(rename = "idIssuePlace")]
    pub id_issue_place: String,
    #[serde(rename = "idIssueDate")]
    pub id_issue_date: String,
    #[serde(rename = "idExpiryDate")]
    pub id_expiry_date: String,
    /// Hijri, `DD-MM-YYYY`.
    pub birth_date: String,

    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,

    pub first_name: String,
    pub father_name: String,
    pub grand_father_name: String,
    pub subtribe_name: String,
    pub family_name: String,

    pub gender: String,
    pub place_of_birth: String,
}

/// Resident (iqama holder) lookup result from the identity registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlienInfo {
    #[serde(rename = "iqamaID")]
    pub iqama_id: String,
    pub iqama_issue_place_desc: String,
    #[serde(rename = "iqamaIssueDateH")]
    pub iqama_issue_date_h: String,
    #[serde(rename = "iqamaExpiryDateH")]
    pub iqama_expiry_date_h: String,
    pub birth_date: String,

    pub nationality_desc: String,
    pub occupation_desc: String,
    pub gender: String,

    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,

    pub first_name: String,
    pub second_name: String,
    pub third_name: String,
    pub last_name: String,
}

/// Full person record from the civil registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CivilRecord {
    pub id: String,
    pub gender: String,
    pub mobile_number: String,

    pub nationality_code: String,
    pub nationality_desc_ar: String,
    pub occupation_code: String,
    pub occupation_desc_ar: String,

    pub first_name_en: String,
    pub second_name_en: String,
    pub third_name_en: String,
    pub last_name_en: String,

    pub first_name_ar: String,
    pub second_name_ar: String,
    pub third_name_ar: String,
    pub last_name_ar: String,

    /// Gregorian, `YYYY-MM-DDThh:mm:ss`.
    #[serde(rename = "birthDateG")]
    pub birth_date_g: String,
}

/// Three-part person name as the licensing registry returns it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    pub second_name: String,
    pub last_name: String,
}

/// A coded value with Arabic and English display names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodedName {
    pub code: String,
    pub name_ar: String,
    pub name_en: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseStatus {
    pub code: String,
    pub desc_ar: String,
    pub license_issued_date: String,
    pub license_expiry_date: String,
}

/// Practitioner profile from the professional licensing registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PractitionerLicense {
    pub registration_number: String,
    pub name_ar: PersonName,
    pub name_en: PersonName,
    pub gender: CodedName,
    pub category: CodedName,
    pub specialty: CodedName,
    pub status: LicenseStatus,
}
