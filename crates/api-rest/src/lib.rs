//! # API REST
//!
//! REST API for the identity hub.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (query parsing, JSON serialization, CORS, status codes)
//!
//! Resolution logic lives in `identity-core`; handlers validate input and delegate.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, put},
    Router,
};
use identity_core::IdentityController;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared state for the REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: IdentityController,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_patient,
        handlers::get_patient_v1,
        handlers::get_patient_v2,
        handlers::update_patient,
        handlers::get_full_patient,
        handlers::get_patient_by_id,
        handlers::get_practitioner,
        handlers::get_establishment,
        handlers::list_establishments,
        handlers::get_establishment_v2,
        handlers::list_establishments_v2,
        handlers::update_establishment,
    ),
    components(schemas(
        handlers::StatusRes,
        error::ErrorRes,
        identity_records::PatientRecord,
        identity_records::PractitionerRecord,
        identity_records::CompatCitizen,
        identity_records::CompatExpat,
        identity_records::CompatCitizenV2,
        identity_records::CompatExpatV2,
        identity_records::Establishment,
        identity_records::EstablishmentSummary,
        identity_records::EstablishmentV2,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patient",
            get(handlers::get_patient).put(handlers::update_patient),
        )
        .route("/v1/patient", get(handlers::get_patient_v1))
        .route("/v2/patient", get(handlers::get_patient_v2))
        .route("/patient/full", get(handlers::get_full_patient))
        .route("/patient/:id", get(handlers::get_patient_by_id))
        .route("/practitioner/:id", get(handlers::get_practitioner))
        .route("/establishment", put(handlers::update_establishment))
        .route("/establishment/:id", get(handlers::get_establishment))
        .route("/establishments", get(handlers::list_establishments))
        .route("/v2/establishment/:id", get(handlers::get_establishment_v2))
        .route("/v2/establishments", get(handlers::list_establishments_v2))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use identity_core::{
        CoreConfig, FeatureSwitches, FormatterDefaults, MemoryStore, Registries, Store, WriteBack,
    };
    use identity_records::{Establishment, PatientRecord};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn app_with(store: Arc<MemoryStore>, features: &[&str]) -> Router {
        let (write_back, _worker) = WriteBack::spawn(store.clone());
        let config = CoreConfig::new(
            FeatureSwitches::new(features.iter().copied()),
            FormatterDefaults::default(),
        );
        let controller = IdentityController::new(
            store,
            Registries::unconfigured(),
            write_back,
            Arc::new(config),
        );
        router(AppState { controller })
    }

    async fn cached_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_patient(&PatientRecord {
                id_number: Some("1012345678".into()),
                id_type: Some("NationalId".into()),
                date_of_birth_g: Some("21-07-1963".into()),
                age: Some("63".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
    }

    async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, Body::empty()).await
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_with(Arc::new(MemoryStore::new()), &[]).await;
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn malformed_queries_are_rejected_before_lookup() {
        let app = app_with(Arc::new(MemoryStore::new()), &[]).await;

        let (status, body) = get(app.clone(), "/patient?id=3012345678&birth_date=1990-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "patient type is unknown");

        let (status, body) = get(app.clone(), "/patient?id=1012345678&birth_date=1990").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "malformed birth_date");

        let (status, _) = get(app, "/v2/patient").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn cached_patient_is_served_in_every_shape() {
        let app = app_with(cached_store().await, &[]).await;
        let query = "id=1012345678&birth_date=1963-07-21";

        let (status, body) = get(app.clone(), &format!("/patient?{query}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id_number"], "1012345678");
        assert!(body.get("health_id").is_none());

        let (status, body) = get(app.clone(), &format!("/v1/patient?{query}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], 63);
        assert_eq!(body["date_of_birth"], "1963-07-21");
        assert_eq!(body["health_id"], "N/A");
        assert_eq!(body["nationality_code"], "SAU");

        let (status, body) = get(app, &format!("/v2/patient?{query}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date_of_birth"], "21-07-1963");
        assert_eq!(body["marital_status_code"], "U");
    }

    #[tokio::test]
    async fn miss_without_registry_is_a_server_error() {
        let app = app_with(Arc::new(MemoryStore::new()), &[]).await;
        let (status, body) = get(app, "/patient?id=2123456789&birth_date=1990-01-01").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "encountered error while fetch information");
    }

    #[tokio::test]
    async fn miss_with_upstream_disabled_is_not_found() {
        let app = app_with(Arc::new(MemoryStore::new()), &["disable-upstream"]).await;
        let (status, _) = get(app, "/patient?id=2123456789&birth_date=1990-01-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patient_by_id_reads_cache_only() {
        let app = app_with(cached_store().await, &[]).await;

        let (status, _) = get(app.clone(), "/patient/1012345678").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = get(app, "/patient/2123456789").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn practitioner_miss_reports_registry_failure() {
        let app = app_with(Arc::new(MemoryStore::new()), &[]).await;
        let (status, _) = get(app, "/practitioner/1012345678").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn establishments_can_be_listed_and_updated() {
        let store = Arc::new(MemoryStore::new());
        store.add_establishment(Establishment {
            id: Some("7".into()),
            code: Some("C7".into()),
            organization_id: Some("O7".into()),
            ..Default::default()
        });
        let app = app_with(store, &[]).await;

        let (status, body) = get(app.clone(), "/establishments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, _) = get(app.clone(), "/establishment/8").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let bad = Body::from(r#"{"code":"C7"}"#);
        let (status, _) = send(app.clone(), Method::PUT, "/establishment", bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let good = Body::from(r#"{"code":"C7","organization_id":"O7","name_en":"Clinic"}"#);
        let (status, _) = send(app.clone(), Method::PUT, "/establishment", good).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(app, "/establishment/7").await;
        assert_eq!(body["name_en"], "Clinic");
    }
}
