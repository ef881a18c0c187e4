//! Canonical practitioner record.
//!
//! Rows are keyed by the practitioner's national id / iqama number. Licensing data comes from the
//! professional licensing registry; the remaining columns are maintained by the store.
//!
//! Wire presence is deliberate and differs per column:
//! - most fields are omitted when absent
//! - a handful (`row_updated_at`, nationality, establishment linkage, ...) are always emitted,
//!   as `null` when absent
//! - internal bookkeeping columns never serialize

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PractitionerRecord {
    // Search-log fields, returned when there is no cached match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_health_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,

    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub practitioner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub address: Option<serde_json::Value>,
    #[serde(skip)]
    pub row_inserted_at: Option<String>,
    pub row_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_deleted_at: Option<String>,
    #[serde(skip)]
    pub is_deleted: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name_ar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name_en: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_issue_date: Option<String>,
    pub birth_date_original: Option<String>,
    #[serde(rename = "birth_date_gregorian")]
    pub birth_date_gregorian: Option<String>,
    #[serde(rename = "birth_date_hirji")]
    pub birth_date_hijri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_code: Option<String>,

    pub nationality_ar: Option<String>,
    pub nationality_en: Option<String>,
    pub nationality_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_expiry_date: Option<String>,
    pub establishment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment_sector: Option<String>,
    pub establishment_org_id: Option<String>,
    #[serde(skip)]
    pub hls_practitioners_id: Option<String>,
    #[serde(skip)]
    pub hls_practitioner_licenses_id: Option<String>,
    #[serde(skip)]
    pub hls_establishment_id: Option<String>,
    #[serde(skip)]
    pub hls_establishment_license_id: Option<String>,
    #[serde(skip)]
    pub source_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date_h: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date_g: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_registration_issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_registration_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_registration_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_expiry_date: Option<String>,

    pub license_number: Option<String>,
    #[serde(skip)]
    pub legacy_job: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_category_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_category_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_category_en: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_speciality_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_speciality_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_speciality_en: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_practitioner_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scfhs_practitioner_status_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_number: Option<String>,
    pub university_faculty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_distinguishes_omitted_null_and_internal_fields() {
        let record = PractitionerRecord {
            id: 42,
            practitioner_id: Some("HID-1".into()),
            source_system: Some("licensing".into()),
            scfhs_registration_number: Some("09-R-0001".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).expect("serialize practitioner");
        let obj = json.as_object().expect("object");

        // Internal-only columns never leave the process.
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("practitioner_id"));
        assert!(!obj.contains_key("source_system"));

        // Always-emitted columns appear as null.
        assert!(obj["row_updated_at"].is_null());
        assert!(obj["nationality_code"].is_null());
        assert!(obj["birth_date_hirji"].is_null());

        // Optional columns are omitted.
        assert!(!obj.contains_key("first_name_en"));
        assert_eq!(obj["scfhs_registration_number"], "09-R-0001");
    }
}
