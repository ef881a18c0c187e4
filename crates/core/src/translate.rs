//! Registry payload to canonical record mapping.
//!
//! Each translator writes onto an existing row rather than building a new one: the row may be the
//! partial returned by a cache miss, and its `date_g`/`date_h` calendar hints feed the birth date
//! the registry did not supply.

use crate::calculator::civil_birth_date;
use crate::constants::{ID_TYPE_IQAMA, ID_TYPE_NATIONAL_ID};
use crate::query::{classify, IdentityKind};
use identity_records::{
    AlienInfo, CitizenInfo, CivilRecord, PatientRecord, PractitionerLicense, PractitionerRecord,
};

fn id_type_for(kind: IdentityKind) -> Option<String> {
    match kind {
        IdentityKind::Citizen => Some(ID_TYPE_NATIONAL_ID.to_string()),
        IdentityKind::Expat => Some(ID_TYPE_IQAMA.to_string()),
        IdentityKind::Unknown => None,
    }
}

/// Maps an identity registry citizen payload onto `row`.
pub fn citizen_to_patient(info: CitizenInfo, row: &mut PatientRecord) {
    row.id_type = Some(ID_TYPE_NATIONAL_ID.to_string());
    row.id_number = Some(info.national_id);
    row.id_issue_place = Some(info.id_issue_place);
    row.id_issue_date = Some(info.id_issue_date);
    row.id_expiry_date = Some(info.id_expiry_date);
    row.date_of_birth_h = Some(info.birth_date);
    row.date_of_birth_g = row.date_g.clone();

    row.first_name_en = Some(info.english_first_name);
    row.second_name_en = Some(info.english_second_name);
    row.third_name_en = Some(info.english_third_name);
    row.last_name_en = Some(info.english_last_name);

    row.first_name_ar = Some(info.first_name);
    row.second_name_ar = Some(info.father_name);
    row.third_name_ar = Some(info.grand_father_name);
    row.subtribe_name = Some(info.subtribe_name);
    row.last_name_ar = Some(info.family_name);

    row.gender = Some(info.gender);
    row.place_of_birth = Some(info.place_of_birth);
}

/// Maps an identity registry expatriate payload onto `row`.
pub fn expat_to_patient(info: AlienInfo, row: &mut PatientRecord) {
    row.id_type = Some(ID_TYPE_IQAMA.to_string());
    row.id_number = Some(info.iqama_id);
    row.id_issue_place = Some(info.iqama_issue_place_desc);
    row.id_issue_date = Some(info.iqama_issue_date_h);
    row.id_expiry_date = Some(info.iqama_expiry_date_h);
    row.date_of_birth_h = Some(info.birth_date);
    row.date_of_birth_g = row.date_g.clone();

    row.nationality = Some(info.nationality_desc);
    row.occupation = Some(info.occupation_desc);
    row.gender = Some(info.gender);

    row.first_name_en = Some(info.english_first_name);
    row.second_name_en = Some(info.english_second_name);
    row.third_name_en = Some(info.english_third_name);
    row.last_name_en = Some(info.english_last_name);

    row.first_name_ar = Some(info.first_name);
    row.second_name_ar = Some(info.second_name);
    row.third_name_ar = Some(info.third_name);
    row.last_name_ar = Some(info.last_name);
}

/// Maps a civil registry record onto `row`.
///
/// # Errors
///
/// Returns the parse error when the birth timestamp is not `YYYY-MM-DDThh:mm:ss`. The row is left
/// untouched in that case.
pub fn civil_to_patient(
    record: CivilRecord,
    kind: IdentityKind,
    row: &mut PatientRecord,
) -> Result<(), chrono::ParseError> {
    let birth_date = civil_birth_date(&record.birth_date_g)?;

    row.id_number = Some(record.id);
    row.gender = Some(record.gender);
    row.mobile_number = Some(record.mobile_number);

    row.nationality_code = Some(record.nationality_code);
    row.nationality = Some(record.nationality_desc_ar);
    row.occupation_code = Some(record.occupation_code);
    row.occupation = Some(record.occupation_desc_ar);

    row.first_name_en = Some(record.first_name_en);
    row.second_name_en = Some(record.second_name_en);
    row.third_name_en = Some(record.third_name_en);
    row.last_name_en = Some(record.last_name_en);

    row.first_name_ar = Some(record.first_name_ar);
    row.second_name_ar = Some(record.second_name_ar);
    row.third_name_ar = Some(record.third_name_ar);
    row.last_name_ar = Some(record.last_name_ar);

    row.date_of_birth_g = Some(birth_date);
    row.date_of_birth_h = row.date_h.clone();

    if let Some(id_type) = id_type_for(kind) {
        row.id_type = Some(id_type);
    }
    Ok(())
}

/// Maps a licensing registry payload for `id` onto `row`.
///
/// The registry's status code lands in `scfhs_practitioner_status` and its Arabic description in
/// `scfhs_practitioner_status_code`; downstream consumers read them that way round.
pub fn license_to_practitioner(license: PractitionerLicense, id: &str, row: &mut PractitionerRecord) {
    row.scfhs_registration_number = Some(license.registration_number);
    row.practitioner_id = row.health_id.clone();
    row.id_number = Some(id.to_string());

    row.first_name_ar = Some(license.name_ar.first_name);
    row.second_name_ar = Some(license.name_ar.second_name);
    row.last_name_ar = Some(license.name_ar.last_name);

    row.first_name_en = Some(license.name_en.first_name);
    row.second_name_en = Some(license.name_en.second_name);
    row.last_name_en = Some(license.name_en.last_name);

    row.gender_code = Some(license.gender.code);
    row.gender_ar = Some(license.gender.name_ar);
    row.gender_en = Some(license.gender.name_en);

    row.scfhs_category_code = Some(license.category.code);
    row.scfhs_category_ar = Some(license.category.name_ar);
    row.scfhs_category_en = Some(license.category.name_en);

    row.scfhs_speciality_code = Some(license.specialty.code);
    row.scfhs_speciality_ar = Some(license.specialty.name_ar);
    row.scfhs_speciality_en = Some(license.specialty.name_en);

    row.scfhs_practitioner_status = Some(license.status.code);
    row.scfhs_practitioner_status_code = Some(license.status.desc_ar);

    row.scfhs_registration_issue_date = Some(license.status.license_issued_date);
    row.scfhs_registration_expiry_date = Some(license.status.license_expiry_date);

    if let Some(id_type) = id_type_for(classify(id)) {
        row.id_type = Some(id_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use identity_records::{CodedName, LicenseStatus, PersonName};

    #[test]
    fn citizen_keeps_gregorian_hint_and_takes_hijri_from_payload() {
        let mut row = PatientRecord {
            date_g: Some("21-07-1963".into()),
            health_id: Some("H-1".into()),
            ..Default::default()
        };
        let info = CitizenInfo {
            national_id: "1012345678".into(),
            birth_date: "01-03-1383".into(),
            first_name: "محمد".into(),
            father_name: "علي".into(),
            family_name: "الحربي".into(),
            ..Default::default()
        };

        citizen_to_patient(info, &mut row);

        assert_eq!(row.id_type.as_deref(), Some("NationalId"));
        assert_eq!(row.id_number.as_deref(), Some("1012345678"));
        assert_eq!(row.date_of_birth_g.as_deref(), Some("21-07-1963"));
        assert_eq!(row.date_of_birth_h.as_deref(), Some("01-03-1383"));
        assert_eq!(row.second_name_ar.as_deref(), Some("علي"));
        assert_eq!(row.last_name_ar.as_deref(), Some("الحربي"));
        assert_eq!(row.health_id.as_deref(), Some("H-1"));
    }

    #[test]
    fn citizen_without_hint_has_no_gregorian_birth_date() {
        let mut row = PatientRecord::default();
        citizen_to_patient(CitizenInfo::default(), &mut row);
        assert_eq!(row.date_of_birth_g, None);
        assert_eq!(row.date_of_birth_h.as_deref(), Some(""));
    }

    #[test]
    fn expat_maps_iqama_fields() {
        let mut row = PatientRecord::default();
        let info = AlienInfo {
            iqama_id: "2123456789".into(),
            iqama_issue_place_desc: "Riyadh".into(),
            iqama_expiry_date_h: "01-01-1450".into(),
            nationality_desc: "Egyptian".into(),
            occupation_desc: "Engineer".into(),
            ..Default::default()
        };

        expat_to_patient(info, &mut row);

        assert_eq!(row.id_type.as_deref(), Some("Iqama"));
        assert_eq!(row.id_issue_place.as_deref(), Some("Riyadh"));
        assert_eq!(row.id_expiry_date.as_deref(), Some("01-01-1450"));
        assert_eq!(row.nationality.as_deref(), Some("Egyptian"));
        assert_eq!(row.occupation.as_deref(), Some("Engineer"));
    }

    #[test]
    fn civil_record_reformats_birth_date_and_keeps_hijri_hint() {
        let mut row = PatientRecord {
            date_h: Some("01-03-1383".into()),
            ..Default::default()
        };
        let record = CivilRecord {
            id: "1012345678".into(),
            nationality_code: "SAU".into(),
            nationality_desc_ar: "سعودي".into(),
            birth_date_g: "1963-07-21T00:00:00".into(),
            ..Default::default()
        };

        civil_to_patient(record, IdentityKind::Citizen, &mut row).unwrap();

        assert_eq!(row.date_of_birth_g.as_deref(), Some("21-07-1963"));
        assert_eq!(row.date_of_birth_h.as_deref(), Some("01-03-1383"));
        assert_eq!(row.nationality.as_deref(), Some("سعودي"));
        assert_eq!(row.id_type.as_deref(), Some("NationalId"));
    }

    #[test]
    fn civil_record_with_bad_birth_date_leaves_row_untouched() {
        let mut row = PatientRecord::default();
        let record = CivilRecord {
            id: "1012345678".into(),
            birth_date_g: "21/07/1963".into(),
            ..Default::default()
        };

        assert!(civil_to_patient(record, IdentityKind::Citizen, &mut row).is_err());
        assert_eq!(row, PatientRecord::default());
    }

    #[test]
    fn license_maps_status_fields_and_id_type() {
        let mut row = PractitionerRecord {
            health_id: Some("H-9".into()),
            ..Default::default()
        };
        let license = PractitionerLicense {
            registration_number: "09-R-1234".into(),
            name_en: PersonName {
                first_name: "Sara".into(),
                second_name: "M".into(),
                last_name: "Ali".into(),
            },
            gender: CodedName {
                code: "F".into(),
                name_ar: "أنثى".into(),
                name_en: "Female".into(),
            },
            status: LicenseStatus {
                code: "1".into(),
                desc_ar: "نشط".into(),
                license_issued_date: "2020-01-01".into(),
                license_expiry_date: "2027-01-01".into(),
            },
            ..Default::default()
        };

        license_to_practitioner(license, "2123456789", &mut row);

        assert_eq!(row.practitioner_id.as_deref(), Some("H-9"));
        assert_eq!(row.id_number.as_deref(), Some("2123456789"));
        assert_eq!(row.id_type.as_deref(), Some("Iqama"));
        assert_eq!(row.scfhs_practitioner_status.as_deref(), Some("1"));
        assert_eq!(row.scfhs_practitioner_status_code.as_deref(), Some("نشط"));
        assert_eq!(row.scfhs_registration_expiry_date.as_deref(), Some("2027-01-01"));
        assert_eq!(row.gender_en.as_deref(), Some("Female"));
    }

    #[test]
    fn license_for_unknown_id_shape_sets_no_id_type() {
        let mut row = PractitionerRecord::default();
        license_to_practitioner(PractitionerLicense::default(), "999", &mut row);
        assert_eq!(row.id_type, None);
    }
}
