use http::StatusCode;
use role_admin::{CoordinationError, RoleError};

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                CoordinationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                CoordinationError::RoleError(RoleError::NotFound) => StatusCode::NOT_FOUND,
                CoordinationError::RoleError(RoleError::InvalidData(_)) => StatusCode::BAD_REQUEST,
                CoordinationError::RoleError(RoleError::Conflict(_)) => StatusCode::CONFLICT,
                CoordinationError::RoleError(RoleError::Storage(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (status, e.to_string())
        })
    }
}
