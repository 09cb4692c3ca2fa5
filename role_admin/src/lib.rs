//! role_admin - Authorization-guarded role deletion
//!
//! This crate decides whether an administrator may delete a role and, when
//! allowed, removes it from the role store.
//!
//! - [`RoleDeletionPolicy`] is the pure decision: administrator capability
//!   first, then the reserved administrator role, then existing assignments.
//! - [`delete_role_admin`] runs the policy against stored data and performs the
//!   delete inside one transaction.
//! - [`RoleStore`] persists roles and user-role assignments in SQLite or
//!   PostgreSQL, selected with `GENERIC_DATA_STORE_TYPE` /
//!   `GENERIC_DATA_STORE_URL`.

mod config;
mod coordination;
mod policy;
mod roledb;
mod storage;

#[cfg(test)]
mod test_utils;

pub use config::ROLE_ADMIN_NAME;

pub use coordination::{CoordinationError, delete_role_admin, delete_role_admin_with_policy};

pub use policy::{
    Actor, DenialReason, RoleDeletionOutcome, RoleDeletionPolicy, evaluate_role_deletion,
};

pub use roledb::{Role, RoleDeleteResult, RoleError, RoleSearchField, RoleStore};

pub use storage::StorageError;

/// Initialize the data store and role tables
pub async fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    storage::init().await?;
    roledb::init().await?;
    Ok(())
}
