//! Compatibility shapes for consumers of the legacy and v2 patient endpoints.
//!
//! These are projections of [`crate::PatientRecord`]; the formatter in the core crate fills every
//! text field (substituting configured defaults), so nothing here is optional.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompatCitizen {
    pub health_id: String,
    pub id_type: String,
    pub id_expiry_date: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub age: i64,
    pub place_of_birth: String,
    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,
    pub first_name: String,
    pub father_name: String,
    pub grand_father_name: String,
    pub family_name: String,
    pub subtribe_name: String,
    pub gender: String,
    pub nationality: String,
    pub nationality_code: String,
    pub occupation_code: String,
    pub marital_status: String,
    pub marital_status_code: String,
    pub patient_status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompatExpat {
    pub health_id: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub place_of_birth: String,
    pub id_expiry_date: String,
    pub first_name: String,
    pub father_name: String,
    pub grand_father_name: String,
    pub family_name: String,
    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,
    pub gender: String,
    pub nationality: String,
    pub nationality_code: String,
    pub occupation_code: String,
    pub age: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompatCitizenV2 {
    pub health_id: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub age: i64,
    pub place_of_birth: String,
    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,
    pub first_name_ar: String,
    pub second_name_ar: String,
    pub third_name_ar: String,
    pub last_name_ar: String,
    pub gender: String,
    pub nationality: String,
    pub nationality_code: String,
    pub occupation: String,
    pub marital_status: String,
    pub marital_status_code: String,
    pub patient_status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompatExpatV2 {
    pub health_id: String,
    pub id_type: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub place_of_birth: String,
    pub first_name_ar: String,
    pub second_name_ar: String,
    pub third_name_ar: String,
    pub last_name_ar: String,
    pub english_first_name: String,
    pub english_second_name: String,
    pub english_third_name: String,
    pub english_last_name: String,
    pub gender: String,
    pub nationality: String,
    pub nationality_code: String,
    pub occupation: String,
    pub marital_status: String,
    pub marital_status_code: String,
    pub patient_status: String,
    pub age: i64,
}

/// Output of a compatibility formatter; serializes as the inner shape with no tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompatPatient {
    Citizen(CompatCitizen),
    Expat(CompatExpat),
    CitizenV2(CompatCitizenV2),
    ExpatV2(CompatExpatV2),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compat_patient_serializes_without_tag() {
        let out = CompatPatient::Expat(CompatExpat {
            id_type: "Iqama".into(),
            age: 31,
            ..Default::default()
        });

        let json = serde_json::to_value(&out).expect("serialize");
        assert_eq!(json["id_type"], "Iqama");
        assert_eq!(json["age"], 31);
        assert!(json.get("Expat").is_none());
    }
}
