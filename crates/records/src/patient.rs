//! Canonical patient record.
//!
//! One shape for citizens and expatriates regardless of which registry produced the data.
//! The same struct is used as the cache row, the translator target and the REST response.
//!
//! Notes:
//! - Every field is optional and omitted from JSON when absent. An empty string is a value and
//!   is serialized.
//! - `nationality` and `nationality_code` keep their historical wire names (`nationality_ar` and
//!   `nationality_en`); existing consumers depend on them.
//! - `date_g`/`date_h` are the store's calendar-synced birth dates. The store returns them even
//!   when it has no cached patient row, so the controller can prefer them over raw user input.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PatientRecord {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_g: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_h: Option<String>,

    #[serde(rename = "ClientIdentifierId", skip_serializing_if = "Option::is_none")]
    pub client_identifier_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_issue_place: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,

    /// Whole years, as a decimal string. Derived, never read from a registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    /// Citizens only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_code: Option<String>,
    /// Expatriates only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(rename = "nationality_ar", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "nationality_en", skip_serializing_if = "Option::is_none")]
    pub nationality_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_specified: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hifiza_issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hifiza_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth_g: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth_h: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtribe_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_en: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_and_empty_strings_kept() {
        let record = PatientRecord {
            id_number: Some("1012345678".into()),
            subtribe_name: Some(String::new()),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).expect("serialize patient");
        let obj = json.as_object().expect("object");

        assert_eq!(obj.len(), 2);
        assert_eq!(obj["id_number"], "1012345678");
        assert_eq!(obj["subtribe_name"], "");
        assert!(!obj.contains_key("age"));
    }

    #[test]
    fn nationality_keeps_historical_wire_names() {
        let record = PatientRecord {
            nationality: Some("Egypt".into()),
            nationality_code: Some("EGY".into()),
            client_identifier_id: Some("c-1".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).expect("serialize patient");
        assert_eq!(json["nationality_ar"], "Egypt");
        assert_eq!(json["nationality_en"], "EGY");
        assert_eq!(json["ClientIdentifierId"], "c-1");

        let back: PatientRecord = serde_json::from_value(json).expect("deserialize patient");
        assert_eq!(back, record);
    }
}
