use crate::config::ROLE_ADMIN_NAME;
use crate::roledb::{
    errors::RoleError,
    types::{Role, RoleDeleteResult, RoleSearchField},
};
use crate::storage::data_store;

use super::assignment_count;
use super::postgres::*;
use super::sqlite::*;

pub struct RoleStore;

impl RoleStore {
    /// Initialize the role tables and seed the reserved administrator role
    pub async fn init() -> Result<(), RoleError> {
        let store = data_store().await?;
        let admin_name = ROLE_ADMIN_NAME.as_str();
        let admin_field = RoleSearchField::Name(admin_name.to_string());

        if let Some(pool) = store.as_sqlite() {
            create_tables_sqlite(pool).await?;
            validate_role_tables_sqlite(pool).await?;
            if get_role_by_field_sqlite(pool, &admin_field).await?.is_none() {
                ignore_conflict(insert_role_sqlite(pool, Role::new(admin_name)).await)?;
                tracing::info!("Seeded administrator role '{}'", admin_name);
            }
            Ok(())
        } else if let Some(pool) = store.as_postgres() {
            create_tables_postgres(pool).await?;
            validate_role_tables_postgres(pool).await?;
            if get_role_by_field_postgres(pool, &admin_field).await?.is_none() {
                ignore_conflict(insert_role_postgres(pool, Role::new(admin_name)).await)?;
                tracing::info!("Seeded administrator role '{}'", admin_name);
            }
            Ok(())
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a role by its ID
    pub async fn get_role(id: &str) -> Result<Option<Role>, RoleError> {
        Self::get_role_by(RoleSearchField::Id(id.to_string())).await
    }

    pub async fn get_role_by_name(name: &str) -> Result<Option<Role>, RoleError> {
        Self::get_role_by(RoleSearchField::Name(name.to_string())).await
    }

    #[tracing::instrument(fields(role_field = %field))]
    pub async fn get_role_by(field: RoleSearchField) -> Result<Option<Role>, RoleError> {
        let store = data_store().await?;

        let result = if let Some(pool) = store.as_sqlite() {
            get_role_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_role_by_field_postgres(pool, &field).await
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(found) => tracing::debug!(found = found.is_some(), "Role lookup completed"),
            Err(e) => tracing::error!(error = %e, "Role lookup failed"),
        }

        result
    }

    /// Create a new role with the given name
    #[tracing::instrument]
    pub async fn create_role(name: &str) -> Result<Role, RoleError> {
        if name.trim().is_empty() {
            return Err(RoleError::InvalidData(
                "Role name cannot be empty".to_string(),
            ));
        }

        let role = Role::new(name);
        let store = data_store().await?;

        let result = if let Some(pool) = store.as_sqlite() {
            insert_role_sqlite(pool, role).await
        } else if let Some(pool) = store.as_postgres() {
            insert_role_postgres(pool, role).await
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        };

        if let Ok(role) = &result {
            tracing::info!(role_id = %role.id, "Role created");
        }

        result
    }

    /// Give a user the role; assigning twice is a no-op
    #[tracing::instrument]
    pub async fn assign_role(role_id: &str, user_id: &str) -> Result<(), RoleError> {
        if user_id.is_empty() {
            return Err(RoleError::InvalidData("User ID cannot be empty".to_string()));
        }

        if Self::get_role(role_id).await?.is_none() {
            return Err(RoleError::NotFound);
        }

        let store = data_store().await?;

        if let Some(pool) = store.as_sqlite() {
            assign_role_sqlite(pool, role_id, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            assign_role_postgres(pool, role_id, user_id).await
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Number of users currently holding the role
    #[tracing::instrument]
    pub async fn count_assignments(role_id: &str) -> Result<u64, RoleError> {
        let store = data_store().await?;

        let count = if let Some(pool) = store.as_sqlite() {
            count_assignments_sqlite(pool, role_id).await
        } else if let Some(pool) = store.as_postgres() {
            count_assignments_postgres(pool, role_id).await
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        }?;

        assignment_count(count)
    }

    /// Delete the role only if nobody holds it, checked and applied in one transaction
    #[tracing::instrument]
    pub async fn delete_role_if_unassigned(role_id: &str) -> Result<RoleDeleteResult, RoleError> {
        let store = data_store().await?;

        let result = if let Some(pool) = store.as_sqlite() {
            delete_role_if_unassigned_sqlite(pool, role_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_role_if_unassigned_postgres(pool, role_id).await
        } else {
            Err(RoleError::Storage("Unsupported database type".to_string()))
        }?;

        tracing::debug!(?result, "Guarded role delete completed");
        Ok(result)
    }
}

fn ignore_conflict(result: Result<Role, RoleError>) -> Result<(), RoleError> {
    match result {
        Ok(_) | Err(RoleError::Conflict(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
