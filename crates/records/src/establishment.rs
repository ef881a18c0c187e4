//! Healthcare establishment rows.
//!
//! Establishments are read straight from storage; there is no upstream registry behind them.
//! Three shapes exist:
//! - [`Establishment`]: the v1 single-facility view, also the update payload
//! - [`EstablishmentSummary`]: the v1 list row, which hides most internal columns
//! - [`EstablishmentV2`]: the v2 facility directory view

use crate::{RecordError, RecordResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Establishment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_speciality: Option<String>,

    pub id: Option<String>,
    pub code: Option<String>,
    pub moh_id: Option<String>,
    pub organization_id: Option<String>,
    pub legacy_entity_id: Option<String>,

    #[serde(rename = "created_at")]
    pub row_inserted_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub row_updated_at: Option<String>,
    #[serde(rename = "deleted_at")]
    pub row_deleted_at: Option<String>,
    #[serde(rename = "migrated")]
    pub is_migrated: Option<String>,
    #[serde(rename = "deleted")]
    pub is_deleted: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seha_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seha_health_directory: Option<String>,
    pub level_of_care: Option<String>,
    pub type_of_care: Option<String>,
    pub type_of_care_code: Option<String>,
    pub health_directory_ar: Option<String>,
    pub health_directory_en: Option<String>,
    pub health_directory_seha_id: Option<String>,
    pub sector_ar: Option<String>,
    pub sector_en: Option<String>,
    pub sector_code: Option<String>,
    pub entity_type_ar: Option<String>,
    pub entity_type_en: Option<String>,
    pub entity_type_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,

    pub old_hls_entity_type: Option<String>,
    #[serde(rename = "old_hls_entity_id")]
    pub old_hls_entity_type_id: Option<String>,
    pub old_hls_speciality: Option<String>,
    pub old_hls_speciality_id: Option<String>,
    pub new_hls_entity_type: Option<String>,
    #[serde(rename = "new_hls_entity_id")]
    pub new_hls_entity_type_id: Option<String>,
    pub new_hls_entity_type_code: Option<String>,
    pub new_hls_speciality: Option<String>,
    pub new_hls_speciality_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hls_establishment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hls_establishment_licence_id: Option<String>,
    pub city_ar: Option<String>,
    pub city_en: Option<String>,
    pub city_code: Option<String>,
    pub region_ar: Option<String>,
    pub region_en: Option<String>,
    pub region_code: Option<String>,
    pub location_code: Option<String>,
    pub full_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_building_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_block_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_district_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_manager_name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_manager_id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_manager_mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_manager_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_supervisor_name: Option<String>,
    pub technical_supervisor_category: Option<String>,
    pub technical_supervisor_speciality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_supervisor_license_expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_director_name: Option<String>,
}

impl Establishment {
    /// Checks the columns the store keys updates on.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyOrganizationId`] or [`RecordError::EmptyCode`] when the
    /// respective column is absent. Presence is what matters; an empty string passes.
    pub fn validate(&self) -> RecordResult<()> {
        if self.organization_id.is_none() {
            return Err(RecordError::EmptyOrganizationId);
        }
        if self.code.is_none() {
            return Err(RecordError::EmptyCode);
        }
        Ok(())
    }
}

/// One row of the v1 establishment listing.
///
/// Shares columns with [`Establishment`] but only exposes the directory-facing subset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EstablishmentSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_speciality: Option<String>,

    #[serde(skip)]
    pub id: Option<String>,
    pub code: Option<String>,
    #[serde(skip)]
    pub moh_id: Option<String>,
    pub organization_id: Option<String>,
    #[serde(skip)]
    pub legacy_entity_id: Option<String>,

    #[serde(skip)]
    pub row_inserted_at: Option<String>,
    #[serde(skip)]
    pub row_updated_at: Option<String>,
    #[serde(skip)]
    pub row_deleted_at: Option<String>,
    #[serde(skip)]
    pub is_migrated: Option<String>,
    #[serde(skip)]
    pub is_deleted: Option<String>,

    #[serde(skip)]
    pub cr_number: Option<String>,
    #[serde(skip)]
    pub cr_establishment_name: Option<String>,
    #[serde(skip)]
    pub source_system: Option<String>,

    #[serde(skip)]
    pub notification_email: Option<String>,
    #[serde(skip)]
    pub license_number: Option<String>,
    #[serde(skip)]
    pub issue_date: Option<String>,
    #[serde(skip)]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seha_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    pub level_of_care: Option<String>,
    pub type_of_care: Option<String>,
    pub type_of_care_code: Option<String>,
    pub health_directory_ar: Option<String>,
    pub health_directory_en: Option<String>,
    pub health_directory_seha_id: Option<String>,
    pub sector_ar: Option<String>,
    pub sector_en: Option<String>,
    pub sector_code: Option<String>,
    pub city_ar: Option<String>,
    pub city_en: Option<String>,
    pub city_code: Option<String>,
    pub region_ar: Option<String>,
    pub region_en: Option<String>,
    pub region_code: Option<String>,
    pub location_code: Option<String>,
}

impl From<&Establishment> for EstablishmentSummary {
    fn from(est: &Establishment) -> Self {
        Self {
            error_msg: est.error_msg.clone(),
            msg: est.msg.clone(),
            entity_type: est.entity_type.clone(),
            entity_speciality: est.entity_speciality.clone(),
            id: est.id.clone(),
            code: est.code.clone(),
            moh_id: est.moh_id.clone(),
            organization_id: est.organization_id.clone(),
            legacy_entity_id: est.legacy_entity_id.clone(),
            row_inserted_at: est.row_inserted_at.clone(),
            row_updated_at: est.row_updated_at.clone(),
            row_deleted_at: est.row_deleted_at.clone(),
            is_migrated: est.is_migrated.clone(),
            is_deleted: est.is_deleted.clone(),
            cr_number: None,
            cr_establishment_name: None,
            source_system: None,
            notification_email: est.notification_email.clone(),
            license_number: est.license_number.clone(),
            issue_date: est.issue_date.clone(),
            expiry_date: est.expiry_date.clone(),
            name_ar: est.name_ar.clone(),
            name_en: est.name_en.clone(),
            seha_id: est.seha_id.clone(),
            beds_count: est.beds_count.clone(),
            longitude: est.longitude.clone(),
            latitude: est.latitude.clone(),
            level_of_care: est.level_of_care.clone(),
            type_of_care: est.type_of_care.clone(),
            type_of_care_code: est.type_of_care_code.clone(),
            health_directory_ar: est.health_directory_ar.clone(),
            health_directory_en: est.health_directory_en.clone(),
            health_directory_seha_id: est.health_directory_seha_id.clone(),
            sector_ar: est.sector_ar.clone(),
            sector_en: est.sector_en.clone(),
            sector_code: est.sector_code.clone(),
            city_ar: est.city_ar.clone(),
            city_en: est.city_en.clone(),
            city_code: est.city_code.clone(),
            region_ar: est.region_ar.clone(),
            region_en: est.region_en.clone(),
            region_code: est.region_code.clone(),
            location_code: est.location_code.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EstablishmentV2 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    pub facility_address: Option<String>,
    pub postal_address: Option<String>,

    pub organization_name: Option<String>,
    pub organization_id: Option<String>,
    pub organization_speciality: Option<String>,
    pub organization_credentials: Option<String>,
    pub organization_contact: Option<String>,

    pub facility_unique_identifier: Option<String>,
    pub facility_sector_identifier: Option<String>,
    pub facility_level_of_care_identifier: Option<String>,
    pub facility_type_of_care: Option<String>,
    pub facility_operation_status: Option<String>,

    #[serde(rename = "electronic_service_url")]
    pub electronic_service_uri: Option<String>,
    pub medical_records_delivery_email: Option<String>,
    pub last_updated_time: Option<String>,

    pub provider_language_supported: Option<String>,
    pub provider_relationship: Option<String>,

    #[serde(rename = "available_hospital_beds_admitted_Patients")]
    pub available_hospital_beds_admitted_patients: Option<String>,
    pub available_operating_rooms: Option<String>,
    pub available_emergency_beds: Option<String>,
    #[serde(rename = "available_intensive_dare_unit_areas_average_beds")]
    pub available_intensive_care_unit_average_beds: Option<String>,

    pub total_hospital_beds: Option<String>,
    pub teaching_status: Option<String>,
    pub the_700_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_organization_id_then_code() {
        let mut est = Establishment::default();
        assert_eq!(est.validate(), Err(RecordError::EmptyOrganizationId));

        est.organization_id = Some("ORG-1".into());
        assert_eq!(est.validate(), Err(RecordError::EmptyCode));

        est.code = Some(String::new());
        assert_eq!(est.validate(), Ok(()));
    }

    #[test]
    fn summary_hides_internal_columns() {
        let est = Establishment {
            id: Some("17".into()),
            code: Some("C-17".into()),
            organization_id: Some("ORG-17".into()),
            license_number: Some("LIC-9".into()),
            name_en: Some("North Clinic".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(EstablishmentSummary::from(&est)).expect("serialize");
        let obj = json.as_object().expect("object");

        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("license_number"));
        assert_eq!(obj["code"], "C-17");
        assert_eq!(obj["name_en"], "North Clinic");
        assert!(obj["city_en"].is_null());
    }
}
