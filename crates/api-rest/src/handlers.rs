//! Request handlers.
//!
//! Identity queries are read from raw query pairs and validated here, before the controller is
//! called.

use crate::error::{ApiError, ErrorRes};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use identity_core::{format_legacy, format_v2, validate, validate_id_only, IdentityQuery};
use identity_records::{
    CompatCitizen, CompatCitizenV2, CompatPatient, Establishment, EstablishmentSummary,
    EstablishmentV2, PatientRecord, PractitionerRecord,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

type RawQuery = Query<Vec<(String, String)>>;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusRes {
    pub ok: bool,
    pub message: String,
}

/// Query parameters of the patient endpoints, for the OpenAPI document. Handlers read raw
/// pairs so repeated or unknown keys follow the query parser's rules.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientParams {
    /// National id (10 digits, starts with 1) or iqama number (starts with 2).
    pub id: String,
    /// `YYYY-MM-DD` or `DD-MM-YYYY`; Hijri for citizens, Gregorian for expatriates.
    pub birth_date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = StatusRes))
)]
pub async fn health() -> Json<StatusRes> {
    Json(StatusRes {
        ok: true,
        message: "identity hub is alive".into(),
    })
}

async fn resolve(
    state: &AppState,
    pairs: Vec<(String, String)>,
) -> Result<(IdentityQuery, PatientRecord), ApiError> {
    let mut query = IdentityQuery::from_query_pairs(pairs);
    validate(&query)?;
    let row = state.controller.resolve_patient(&mut query).await?;
    Ok((query, row))
}

#[utoipa::path(
    get,
    path = "/patient",
    params(PatientParams),
    responses(
        (status = 200, description = "Canonical patient record", body = PatientRecord),
        (status = 400, description = "Malformed query or rejected by the registry", body = ErrorRes),
        (status = 404, description = "Not cached and upstream disabled", body = ErrorRes),
        (status = 500, description = "Store or registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Query(pairs): RawQuery,
) -> Result<Json<PatientRecord>, ApiError> {
    let (_, row) = resolve(&state, pairs).await?;
    Ok(Json(row))
}

#[utoipa::path(
    get,
    path = "/v1/patient",
    params(PatientParams),
    responses(
        (status = 200, description = "Legacy shape; CompatExpat for iqama numbers", body = CompatCitizen),
        (status = 400, description = "Malformed query or rejected by the registry", body = ErrorRes),
        (status = 404, description = "Not cached and upstream disabled", body = ErrorRes),
        (status = 500, description = "Store or registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient_v1(
    State(state): State<AppState>,
    Query(pairs): RawQuery,
) -> Result<Json<CompatPatient>, ApiError> {
    let (query, row) = resolve(&state, pairs).await?;
    let out = format_legacy(&query, &row, state.controller.config().defaults())?;
    Ok(Json(out))
}

#[utoipa::path(
    get,
    path = "/v2/patient",
    params(PatientParams),
    responses(
        (status = 200, description = "v2 shape; CompatExpatV2 for iqama numbers", body = CompatCitizenV2),
        (status = 400, description = "Malformed query or rejected by the registry", body = ErrorRes),
        (status = 404, description = "Not cached and upstream disabled", body = ErrorRes),
        (status = 500, description = "Store or registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient_v2(
    State(state): State<AppState>,
    Query(pairs): RawQuery,
) -> Result<Json<CompatPatient>, ApiError> {
    let (query, row) = resolve(&state, pairs).await?;
    let out = format_v2(&query, &row, state.controller.config().defaults())?;
    Ok(Json(out))
}

#[utoipa::path(
    put,
    path = "/patient",
    params(PatientParams),
    responses(
        (status = 200, description = "Stored record refreshed", body = StatusRes),
        (status = 400, description = "Malformed query or rejected by the registry", body = ErrorRes),
        (status = 500, description = "Store or registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Query(pairs): RawQuery,
) -> Result<Json<StatusRes>, ApiError> {
    let query = IdentityQuery::from_query_pairs(pairs);
    validate(&query)?;
    state.controller.update_patient(&query).await?;
    Ok(Json(StatusRes {
        ok: true,
        message: "patient updated".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/patient/full",
    params(PatientParams),
    responses(
        (status = 200, description = "Civil registry record", body = PatientRecord),
        (status = 400, description = "Malformed id or rejected by the registry", body = ErrorRes),
        (status = 500, description = "Registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_full_patient(
    State(state): State<AppState>,
    Query(pairs): RawQuery,
) -> Result<Json<PatientRecord>, ApiError> {
    let query = IdentityQuery::from_query_pairs(pairs);
    validate_id_only(&query)?;
    let row = state.controller.full_patient(&query).await?;
    Ok(Json(row))
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(("id" = String, Path, description = "National id or iqama number")),
    responses(
        (status = 200, description = "Cached patient record", body = PatientRecord),
        (status = 404, description = "Not cached", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    Ok(Json(state.controller.get_patient_by_id(&id).await?))
}

#[utoipa::path(
    get,
    path = "/practitioner/{id}",
    params(("id" = String, Path, description = "National id or iqama number")),
    responses(
        (status = 200, description = "Practitioner record", body = PractitionerRecord),
        (status = 400, description = "Rejected by the licensing registry", body = ErrorRes),
        (status = 404, description = "Unknown practitioner", body = ErrorRes),
        (status = 502, description = "Licensing registry failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_practitioner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PractitionerRecord>, ApiError> {
    Ok(Json(state.controller.get_practitioner(&id).await?))
}

#[utoipa::path(
    get,
    path = "/establishment/{id}",
    params(("id" = String, Path, description = "Establishment row id")),
    responses(
        (status = 200, description = "Establishment", body = Establishment),
        (status = 404, description = "Unknown establishment", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_establishment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Establishment>, ApiError> {
    Ok(Json(state.controller.establishment(&id).await?))
}

#[utoipa::path(
    get,
    path = "/establishments",
    responses((status = 200, description = "All establishments", body = [EstablishmentSummary]))
)]
#[axum::debug_handler]
pub async fn list_establishments(
    State(state): State<AppState>,
) -> Result<Json<Vec<EstablishmentSummary>>, ApiError> {
    Ok(Json(state.controller.establishments().await?))
}

#[utoipa::path(
    get,
    path = "/v2/establishment/{id}",
    params(("id" = String, Path, description = "Organization id")),
    responses(
        (status = 200, description = "Establishment", body = EstablishmentV2),
        (status = 404, description = "Unknown establishment", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_establishment_v2(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EstablishmentV2>, ApiError> {
    Ok(Json(state.controller.establishment_v2(&id).await?))
}

#[utoipa::path(
    get,
    path = "/v2/establishments",
    responses((status = 200, description = "All establishments", body = [EstablishmentV2]))
)]
#[axum::debug_handler]
pub async fn list_establishments_v2(
    State(state): State<AppState>,
) -> Result<Json<Vec<EstablishmentV2>>, ApiError> {
    Ok(Json(state.controller.establishments_v2().await?))
}

#[utoipa::path(
    put,
    path = "/establishment",
    request_body = Establishment,
    responses(
        (status = 200, description = "Establishment updated", body = StatusRes),
        (status = 400, description = "organization_id or code missing", body = ErrorRes),
        (status = 500, description = "Store failure", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_establishment(
    State(state): State<AppState>,
    Json(est): Json<Establishment>,
) -> Result<Json<StatusRes>, ApiError> {
    state.controller.update_establishment(&est).await?;
    Ok(Json(StatusRes {
        ok: true,
        message: "establishment updated".into(),
    }))
}
