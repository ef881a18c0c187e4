use crate::upstream::UpstreamError;

/// Errors surfaced by the identity core to its callers.
///
/// Collaborator failures (store, registries) are logged where they happen and then collapsed
/// into one of these coarse kinds, so driver or transport detail never reaches a caller.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("malformed national_id")]
    BadNationalId,
    #[error("malformed iqama_id")]
    BadIqamaId,
    #[error("malformed birth_date")]
    BadBirthDate,
    #[error("patient type is unknown")]
    UnknownKind,

    #[error("search input error")]
    SearchInput,
    #[error("encountered error while lookup information")]
    LookupInfo,
    #[error("encountered error while fetch information")]
    FetchingInfo,
    #[error("encountered error while update information")]
    UpdateInfo,
    #[error("no info found")]
    NotFound,

    /// Licensing registry failure, passed through from the practitioner path.
    #[error("licensing registry error: {0}")]
    Registry(#[source] UpstreamError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;
