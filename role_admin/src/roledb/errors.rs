use thiserror::Error;

use crate::storage::StorageError;

#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<StorageError> for RoleError {
    fn from(err: StorageError) -> Self {
        RoleError::Storage(err.to_string())
    }
}

impl From<sqlx::Error> for RoleError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => RoleError::Conflict(db_err.to_string()),
            _ => RoleError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RoleError::NotFound.to_string(), "Role not found");
        assert_eq!(
            RoleError::Storage("disk full".to_string()).to_string(),
            "Storage error: disk full"
        );
        assert_eq!(
            RoleError::InvalidData("Role name cannot be empty".to_string()).to_string(),
            "Invalid data: Role name cannot be empty"
        );
        assert_eq!(
            RoleError::Conflict("duplicate name".to_string()).to_string(),
            "Conflict: duplicate name"
        );
    }

    #[test]
    fn test_from_storage_error() {
        let err = RoleError::from(StorageError::Config("GENERIC_DATA_STORE_TYPE must be set".into()));

        match err {
            RoleError::Storage(msg) => assert!(msg.contains("GENERIC_DATA_STORE_TYPE")),
            _ => panic!("Expected Storage variant"),
        }
    }

    #[test]
    fn test_from_sqlx_error() {
        let err = RoleError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RoleError::Storage(_)));
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<RoleError>();
    }
}
