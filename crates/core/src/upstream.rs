//! Upstream registry interfaces.
//!
//! Three registries sit behind the controller:
//! - the identity registry (citizens and expatriates, queried with id + birth date)
//! - the civil registry (full person record by id)
//! - the professional licensing registry (practitioners by id)
//!
//! Client implementations (SOAP/REST transport, token exchange) live outside this crate and only
//! need to implement these traits.

use async_trait::async_trait;
use identity_records::{AlienInfo, CitizenInfo, CivilRecord, PractitionerLicense};
use std::sync::Arc;

/// Failures reported by registry clients.
///
/// `BadDateOfBirth`, `BadId` and `Validation` are caller-correctable; everything else is an
/// internal failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("registry rejected the date of birth")]
    BadDateOfBirth,
    #[error("registry rejected the id")]
    BadId,
    #[error("registry rejected the request: {0}")]
    Validation(String),
    #[error("registry is not available")]
    Unavailable,
    #[error("registry transport failed: {0}")]
    Transport(String),
    #[error("registry payload is malformed: {0}")]
    MalformedPayload(String),
}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

#[async_trait]
pub trait IdentityRegistry: Send + Sync {
    /// `birth_date_hijri` is `DD-MM-YYYY`.
    async fn fetch_citizen(&self, id: &str, birth_date_hijri: &str) -> UpstreamResult<CitizenInfo>;

    /// `birth_date` is `DD-MM-YYYY`, Gregorian.
    async fn fetch_expat(&self, id: &str, birth_date: &str) -> UpstreamResult<AlienInfo>;
}

#[async_trait]
pub trait CivilRegistry: Send + Sync {
    async fn fetch_civil_record(&self, id: &str) -> UpstreamResult<CivilRecord>;
}

#[async_trait]
pub trait LicensingRegistry: Send + Sync {
    async fn fetch_practitioner_license(&self, id: &str) -> UpstreamResult<PractitionerLicense>;
}

/// The full set of registry clients handed to the controller.
#[derive(Clone)]
pub struct Registries {
    pub identity: Arc<dyn IdentityRegistry>,
    pub civil: Arc<dyn CivilRegistry>,
    pub licensing: Arc<dyn LicensingRegistry>,
}

impl Registries {
    pub fn new(
        identity: Arc<dyn IdentityRegistry>,
        civil: Arc<dyn CivilRegistry>,
        licensing: Arc<dyn LicensingRegistry>,
    ) -> Self {
        Self {
            identity,
            civil,
            licensing,
        }
    }

    /// Every registry answers [`UpstreamError::Unavailable`].
    pub fn unconfigured() -> Self {
        let registry = Arc::new(UnconfiguredRegistry);
        Self::new(registry.clone(), registry.clone(), registry)
    }
}

/// Stand-in for deployments with no registry clients wired, such as a cache-only node.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredRegistry;

#[async_trait]
impl IdentityRegistry for UnconfiguredRegistry {
    async fn fetch_citizen(&self, _id: &str, _birth_date_hijri: &str) -> UpstreamResult<CitizenInfo> {
        Err(UpstreamError::Unavailable)
    }

    async fn fetch_expat(&self, _id: &str, _birth_date: &str) -> UpstreamResult<AlienInfo> {
        Err(UpstreamError::Unavailable)
    }
}

#[async_trait]
impl CivilRegistry for UnconfiguredRegistry {
    async fn fetch_civil_record(&self, _id: &str) -> UpstreamResult<CivilRecord> {
        Err(UpstreamError::Unavailable)
    }
}

#[async_trait]
impl LicensingRegistry for UnconfiguredRegistry {
    async fn fetch_practitioner_license(&self, _id: &str) -> UpstreamResult<PractitionerLicense> {
        Err(UpstreamError::Unavailable)
    }
}
