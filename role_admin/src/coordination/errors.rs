//! Error types for role administration

use thiserror::Error;

use crate::roledb::RoleError;

/// Infrastructure failures while coordinating a role operation
///
/// Policy denials are not errors; they come back as
/// [`RoleDeletionOutcome::Denied`](crate::RoleDeletionOutcome::Denied).
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the role store
    #[error("Role error: {0}")]
    RoleError(RoleError),
}

impl CoordinationError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::RoleError(err) => tracing::error!("Role error: {}", err),
        }
        self
    }

    pub(crate) fn role_not_found(role_id: &str) -> Self {
        Self::ResourceNotFound {
            resource_type: "Role".to_string(),
            resource_id: role_id.to_string(),
        }
    }
}

impl From<RoleError> for CoordinationError {
    fn from(err: RoleError) -> Self {
        let error = Self::RoleError(err);
        tracing::error!("{}", error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_error_display() {
        let err = CoordinationError::role_not_found("42");
        assert_eq!(err.to_string(), "Resource not found: Role 42");

        let err = CoordinationError::RoleError(RoleError::NotFound);
        assert_eq!(err.to_string(), "Role error: Role not found");
    }

    #[test]
    fn test_from_role_error() {
        let err: CoordinationError = RoleError::Storage("role db error".to_string()).into();

        match err {
            CoordinationError::RoleError(RoleError::Storage(msg)) => {
                assert_eq!(msg, "role db error");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_log() {
        let logged = CoordinationError::role_not_found("r1").log();
        assert!(matches!(
            logged,
            CoordinationError::ResourceNotFound { resource_id, .. } if resource_id == "r1"
        ));
    }
}
