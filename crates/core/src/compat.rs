//! Compatibility formatters for the legacy and v2 patient endpoints.
//!
//! Older consumers cannot handle missing fields, so every text field is filled: the record's own
//! value when present, else a field-specific fallback, else the general fallback. Present-but-empty
//! values are kept as they are.

use crate::constants::{
    DEFAULT_GENERAL_VALUE, DEFAULT_SA_COUNTRY_CODE, DEFAULT_SA_NATIONALITY,
    DEFAULT_UNKNOWN_MARITAL_STATUS, DEFAULT_UNKNOWN_MARITAL_STATUS_CODE, ID_TYPE_IQAMA,
};
use crate::query::{IdentityKind, IdentityQuery};
use crate::{IdentityError, IdentityResult};
use identity_records::{
    CompatCitizen, CompatCitizenV2, CompatExpat, CompatExpatV2, CompatPatient, PatientRecord,
};

/// Fallback values substituted by the formatters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatterDefaults {
    pub general: String,
    pub citizen_nationality: String,
    pub citizen_nationality_code: String,
    pub marital_status: String,
    pub marital_status_code: String,
}

impl Default for FormatterDefaults {
    fn default() -> Self {
        Self {
            general: DEFAULT_GENERAL_VALUE.to_string(),
            citizen_nationality: DEFAULT_SA_NATIONALITY.to_string(),
            citizen_nationality_code: DEFAULT_SA_COUNTRY_CODE.to_string(),
            marital_status: DEFAULT_UNKNOWN_MARITAL_STATUS.to_string(),
            marital_status_code: DEFAULT_UNKNOWN_MARITAL_STATUS_CODE.to_string(),
        }
    }
}

impl FormatterDefaults {
    pub fn with_general(general: impl Into<String>) -> Self {
        Self {
            general: general.into(),
            ..Self::default()
        }
    }

    /// `value`, else `fallback`, else the general fallback.
    pub fn pick(&self, value: Option<&str>, fallback: Option<&str>) -> String {
        value.or(fallback).unwrap_or(&self.general).to_string()
    }

    fn or_general(&self, value: Option<&String>) -> String {
        self.pick(value.map(String::as_str), None)
    }
}

fn age_as_int(row: &PatientRecord) -> i64 {
    match row.age.as_deref() {
        None => 0,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(age = raw, error = %e, "non-numeric age, emitting 0");
            0
        }),
    }
}

/// Legacy shape. `id_number` and `date_of_birth` come from the query, as resolved.
///
/// # Errors
///
/// Returns [`IdentityError::UnknownKind`] when the query id is neither citizen nor expatriate.
pub fn format_legacy(
    query: &IdentityQuery,
    row: &PatientRecord,
    defaults: &FormatterDefaults,
) -> IdentityResult<CompatPatient> {
    let d = defaults;
    let age = age_as_int(row);
    match query.kind() {
        IdentityKind::Citizen => Ok(CompatPatient::Citizen(CompatCitizen {
            health_id: d.or_general(row.health_id.as_ref()),
            id_type: d.or_general(row.id_type.as_ref()),
            id_expiry_date: d.or_general(row.id_expiry_date.as_ref()),
            id_number: d.or_general(Some(&query.id)),
            date_of_birth: d.or_general(Some(&query.birth_date)),
            age,
            place_of_birth: d.or_general(row.place_of_birth.as_ref()),
            english_first_name: d.or_general(row.first_name_en.as_ref()),
            english_second_name: d.or_general(row.second_name_en.as_ref()),
            english_third_name: d.or_general(row.third_name_en.as_ref()),
            english_last_name: d.or_general(row.last_name_en.as_ref()),
            first_name: d.or_general(row.first_name_ar.as_ref()),
            father_name: d.or_general(row.second_name_ar.as_ref()),
            grand_father_name: d.or_general(row.third_name_ar.as_ref()),
            family_name: d.or_general(row.last_name_ar.as_ref()),
            subtribe_name: d.or_general(row.subtribe_name.as_ref()),
            gender: d.or_general(row.gender.as_ref()),
            nationality: d.pick(row.nationality.as_deref(), Some(d.citizen_nationality.as_str())),
            nationality_code: d.pick(
                row.nationality_code.as_deref(),
                Some(d.citizen_nationality_code.as_str()),
            ),
            occupation_code: d.or_general(row.occupation_code.as_ref()),
            marital_status: d.pick(row.marital_status.as_deref(), Some(d.marital_status.as_str())),
            marital_status_code: d.pick(
                row.marital_status_code.as_deref(),
                Some(d.marital_status_code.as_str()),
            ),
            patient_status: d.or_general(row.patient_status.as_ref()),
        })),
        IdentityKind::Expat => Ok(CompatPatient::Expat(CompatExpat {
            health_id: d.or_general(row.health_id.as_ref()),
            id_type: ID_TYPE_IQAMA.to_string(),
            id_number: d.or_general(Some(&query.id)),
            date_of_birth: d.or_general(Some(&query.birth_date)),
            place_of_birth: d.or_general(row.place_of_birth.as_ref()),
            id_expiry_date: d.or_general(row.id_expiry_date.as_ref()),
            first_name: d.or_general(row.first_name_ar.as_ref()),
            father_name: d.or_general(row.second_name_ar.as_ref()),
            grand_father_name: d.or_general(row.third_name_ar.as_ref()),
            family_name: d.or_general(row.last_name_ar.as_ref()),
            english_first_name: d.or_general(row.first_name_en.as_ref()),
            english_second_name: d.or_general(row.second_name_en.as_ref()),
            english_third_name: d.or_general(row.third_name_en.as_ref()),
            english_last_name: d.or_general(row.last_name_en.as_ref()),
            gender: d.or_general(row.gender.as_ref()),
            nationality: d.or_general(row.nationality.as_ref()),
            nationality_code: d.or_general(row.nationality_code.as_ref()),
            // Legacy consumers read the occupation text from this field.
            occupation_code: d.or_general(row.occupation.as_ref()),
            age,
        })),
        IdentityKind::Unknown => Err(IdentityError::UnknownKind),
    }
}

/// v2 shape. `date_of_birth` is the record's Gregorian birth date.
///
/// # Errors
///
/// Returns [`IdentityError::UnknownKind`] when the query id is neither citizen nor expatriate.
pub fn format_v2(
    query: &IdentityQuery,
    row: &PatientRecord,
    defaults: &FormatterDefaults,
) -> IdentityResult<CompatPatient> {
    let d = defaults;
    let age = age_as_int(row);
    match query.kind() {
        IdentityKind::Citizen => Ok(CompatPatient::CitizenV2(CompatCitizenV2 {
            health_id: d.or_general(row.health_id.as_ref()),
            id_type: d.or_general(row.id_type.as_ref()),
            id_number: d.or_general(Some(&query.id)),
            date_of_birth: d.or_general(row.date_of_birth_g.as_ref()),
            age,
            place_of_birth: d.or_general(row.place_of_birth.as_ref()),
            english_first_name: d.or_general(row.first_name_en.as_ref()),
            english_second_name: d.or_general(row.second_name_en.as_ref()),
            english_third_name: d.or_general(row.third_name_en.as_ref()),
            english_last_name: d.or_general(row.last_name_en.as_ref()),
            first_name_ar: d.or_general(row.first_name_ar.as_ref()),
            second_name_ar: d.or_general(row.second_name_ar.as_ref()),
            third_name_ar: d.or_general(row.third_name_ar.as_ref()),
            last_name_ar: d.or_general(row.last_name_ar.as_ref()),
            gender: d.or_general(row.gender.as_ref()),
            nationality: d.pick(row.nationality.as_deref(), Some(d.citizen_nationality.as_str())),
            nationality_code: d.pick(
                row.nationality_code.as_deref(),
                Some(d.citizen_nationality_code.as_str()),
            ),
            occupation: d.or_general(row.occupation.as_ref()),
            marital_status: d.pick(row.marital_status.as_deref(), Some(d.marital_status.as_str())),
            marital_status_code: d.pick(
                row.marital_status_code.as_deref(),
                Some(d.marital_status_code.as_str()),
            ),
            patient_status: d.or_general(row.patient_status.as_ref()),
        })),
        IdentityKind::Expat => Ok(CompatPatient::ExpatV2(CompatExpatV2 {
            health_id: d.or_general(row.health_id.as_ref()),
            id_type: ID_TYPE_IQAMA.to_string(),
            id_number: d.or_general(Some(&query.id)),
            date_of_birth: d.or_general(row.date_of_birth_g.as_ref()),
            place_of_birth: d.or_general(row.place_of_birth.as_ref()),
            first_name_ar: d.or_general(row.first_name_ar.as_ref()),
            second_name_ar: d.or_general(row.second_name_ar.as_ref()),
            third_name_ar: d.or_general(row.third_name_ar.as_ref()),
            last_name_ar: d.or_general(row.last_name_ar.as_ref()),
            english_first_name: d.or_general(row.first_name_en.as_ref()),
            english_second_name: d.or_general(row.second_name_en.as_ref()),
            english_third_name: d.or_general(row.third_name_en.as_ref()),
            english_last_name: d.or_general(row.last_name_en.as_ref()),
            gender: d.or_general(row.gender.as_ref()),
            nationality: d.or_general(row.nationality.as_ref()),
            nationality_code: d.or_general(row.nationality_code.as_ref()),
            occupation: d.or_general(row.occupation.as_ref()),
            marital_status: d.pick(row.marital_status.as_deref(), Some(d.marital_status.as_str())),
            marital_status_code: d.pick(
                row.marital_status_code.as_deref(),
                Some(d.marital_status_code.as_str()),
            ),
            patient_status: d.or_general(row.patient_status.as_ref()),
            age,
        })),
        IdentityKind::Unknown => Err(IdentityError::UnknownKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::citizen_to_patient;
    use identity_records::CitizenInfo;

    #[test]
    fn pick_prefers_value_then_fallback_then_general() {
        let d = FormatterDefaults::default();
        assert_eq!(d.pick(Some("x"), Some("y")), "x");
        assert_eq!(d.pick(Some(""), Some("y")), "");
        assert_eq!(d.pick(None, Some("y")), "y");
        assert_eq!(d.pick(None, None), "N/A");
    }

    #[test]
    fn legacy_citizen_keeps_every_registry_name_and_fills_sentinels() {
        let mut row = PatientRecord {
            age: Some("63".into()),
            ..Default::default()
        };
        citizen_to_patient(
            CitizenInfo {
                national_id: "1012345678".into(),
                english_first_name: "Mohammed".into(),
                english_second_name: "Abdullah".into(),
                english_third_name: "Saleh".into(),
                english_last_name: "Alqahtani".into(),
                first_name: "محمد".into(),
                father_name: "عبدالله".into(),
                grand_father_name: "صالح".into(),
                subtribe_name: "آل سعيد".into(),
                family_name: "القحطاني".into(),
                ..Default::default()
            },
            &mut row,
        );
        let query = IdentityQuery::new("1012345678", "01-03-1383");

        let out = format_legacy(&query, &row, &FormatterDefaults::default()).unwrap();
        let CompatPatient::Citizen(c) = out else {
            panic!("expected legacy citizen shape");
        };

        assert_eq!(c.age, 63);
        assert_eq!(c.id_number, "1012345678");
        assert_eq!(c.date_of_birth, "01-03-1383");
        assert_eq!(c.english_first_name, "Mohammed");
        assert_eq!(c.english_second_name, "Abdullah");
        assert_eq!(c.english_third_name, "Saleh");
        assert_eq!(c.english_last_name, "Alqahtani");
        assert_eq!(c.first_name, "محمد");
        assert_eq!(c.father_name, "عبدالله");
        assert_eq!(c.grand_father_name, "صالح");
        assert_eq!(c.subtribe_name, "آل سعيد");
        assert_eq!(c.family_name, "القحطاني");
        assert_eq!(c.health_id, "N/A");
        assert_eq!(c.nationality, "Saudi Arabia");
        assert_eq!(c.nationality_code, "SAU");
        assert_eq!(c.marital_status, "Unknown");
        assert_eq!(c.marital_status_code, "U");
        assert_eq!(c.patient_status, "N/A");
    }

    #[test]
    fn legacy_expat_fixes_id_type_and_reads_occupation_text() {
        let row = PatientRecord {
            id_type: Some("Passport".into()),
            occupation: Some("Engineer".into()),
            occupation_code: Some("E01".into()),
            ..Default::default()
        };
        let query = IdentityQuery::new("2123456789", "21-07-1990");

        let out = format_legacy(&query, &row, &FormatterDefaults::with_general("-")).unwrap();
        let CompatPatient::Expat(e) = out else {
            panic!("expected legacy expat shape");
        };

        assert_eq!(e.id_type, "Iqama");
        assert_eq!(e.occupation_code, "Engineer");
        assert_eq!(e.nationality, "-");
        assert_eq!(e.age, 0);
    }

    #[test]
    fn v2_uses_gregorian_birth_date_and_marital_defaults_for_expats() {
        let row = PatientRecord {
            date_of_birth_g: Some("21-07-1990".into()),
            age: Some("thirty".into()),
            ..Default::default()
        };
        let query = IdentityQuery::new("2123456789", "1990-07-21");

        let out = format_v2(&query, &row, &FormatterDefaults::default()).unwrap();
        let CompatPatient::ExpatV2(e) = out else {
            panic!("expected v2 expat shape");
        };

        assert_eq!(e.date_of_birth, "21-07-1990");
        assert_eq!(e.marital_status, "Unknown");
        assert_eq!(e.age, 0);
    }

    #[test]
    fn unknown_kind_is_rejected_by_both_formatters() {
        let query = IdentityQuery::new("999", "01-01-1990");
        let row = PatientRecord::default();
        let d = FormatterDefaults::default();
        assert!(matches!(format_legacy(&query, &row, &d), Err(IdentityError::UnknownKind)));
        assert!(matches!(format_v2(&query, &row, &d), Err(IdentityError::UnknownKind)));
    }
}
