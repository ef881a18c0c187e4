//! HTTP mapping for identity errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use identity_core::{IdentityError, UpstreamError};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Wrapper so [`IdentityError`] can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub IdentityError);

impl From<IdentityError> for ApiError {
    fn from(e: IdentityError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            IdentityError::BadNationalId
            | IdentityError::BadIqamaId
            | IdentityError::BadBirthDate
            | IdentityError::UnknownKind
            | IdentityError::SearchInput => StatusCode::BAD_REQUEST,
            IdentityError::NotFound => StatusCode::NOT_FOUND,
            IdentityError::Registry(
                UpstreamError::BadId | UpstreamError::BadDateOfBirth | UpstreamError::Validation(_),
            ) => StatusCode::BAD_REQUEST,
            IdentityError::Registry(_) => StatusCode::BAD_GATEWAY,
            IdentityError::LookupInfo
            | IdentityError::FetchingInfo
            | IdentityError::UpdateInfo
            | IdentityError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }
        let body = Json(ErrorRes {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_client_errors() {
        for e in [
            IdentityError::BadNationalId,
            IdentityError::BadBirthDate,
            IdentityError::UnknownKind,
            IdentityError::SearchInput,
            IdentityError::Registry(UpstreamError::BadId),
        ] {
            assert_eq!(ApiError(e).status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(ApiError(IdentityError::NotFound).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn collaborator_failures_are_server_errors() {
        assert_eq!(
            ApiError(IdentityError::FetchingInfo).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(IdentityError::Registry(UpstreamError::Unavailable)).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
