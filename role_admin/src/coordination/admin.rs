use crate::config::ROLE_ADMIN_NAME;
use crate::policy::{Actor, DenialReason, RoleDeletionOutcome, RoleDeletionPolicy};
use crate::roledb::{RoleDeleteResult, RoleStore};

use super::errors::CoordinationError;

/// Delete a role on behalf of `actor` using the configured administrator role name
///
/// Returns the policy outcome; `Approved` means the role has been removed.
/// Denials leave the stored state untouched.
pub async fn delete_role_admin(
    actor: &Actor,
    role_id: &str,
) -> Result<RoleDeletionOutcome, CoordinationError> {
    delete_role_admin_with_policy(&RoleDeletionPolicy::from_config(), actor, role_id).await
}

/// Delete a role with a caller-supplied policy
///
/// The role named by `ROLE_ADMIN_NAME` stays protected whatever name the
/// policy carries.
pub async fn delete_role_admin_with_policy(
    policy: &RoleDeletionPolicy,
    actor: &Actor,
    role_id: &str,
) -> Result<RoleDeletionOutcome, CoordinationError> {
    // Non-admins learn nothing about the role, not even whether it exists
    if let Err(reason) = policy.check_actor(actor) {
        tracing::warn!("User {} is not authorized to delete roles", actor.id);
        return Ok(reason.into());
    }

    let role = RoleStore::get_role(role_id)
        .await?
        .ok_or_else(|| CoordinationError::role_not_found(role_id).log())?;

    if role.is_protected(ROLE_ADMIN_NAME.as_str()) {
        tracing::warn!(
            "Admin user: {} attempted to delete the reserved role {}",
            actor.id,
            role.name
        );
        return Ok(DenialReason::ProtectedRole.into());
    }

    let assignment_count = RoleStore::count_assignments(role_id).await?;

    let outcome = policy.evaluate(actor, &role, assignment_count);
    if let RoleDeletionOutcome::Denied(reason) = outcome {
        tracing::debug!(
            "Admin user: {} was refused deletion of role {}: {}",
            actor.id,
            role.name,
            reason
        );
        return Ok(outcome);
    }

    tracing::debug!(
        "Admin user: {} is deleting role {} ({})",
        actor.id,
        role.name,
        role.id
    );

    let result = RoleStore::delete_role_if_unassigned(role_id).await?;
    let outcome = outcome_for_delete_result(result, role_id)?;
    if outcome.is_approved() {
        tracing::info!("Successfully deleted role {} by {}", role.name, actor.id);
    }
    Ok(outcome)
}

/// Map the guarded delete onto an outcome; the row may have changed since it was evaluated
fn outcome_for_delete_result(
    result: RoleDeleteResult,
    role_id: &str,
) -> Result<RoleDeletionOutcome, CoordinationError> {
    match result {
        RoleDeleteResult::Deleted => Ok(RoleDeletionOutcome::Approved),
        RoleDeleteResult::HasAssignments(count) => {
            tracing::debug!(
                "Role {} gained {} assignment(s) before it could be deleted",
                role_id,
                count
            );
            Ok(DenialReason::HasAssignedUsers.into())
        }
        RoleDeleteResult::NotFound => Err(CoordinationError::role_not_found(role_id).log()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roledb::Role;
    use crate::test_utils::{init_test_environment, unique_role_name};
    use serial_test::serial;

    fn admin() -> Actor {
        Actor::new("admin-user", true)
    }

    async fn create_role(prefix: &str) -> Role {
        RoleStore::create_role(&unique_role_name(prefix))
            .await
            .expect("create should succeed")
    }

    async fn role_exists(role_id: &str) -> bool {
        RoleStore::get_role(role_id)
            .await
            .expect("lookup should succeed")
            .is_some()
    }

    #[tokio::test]
    #[serial]
    async fn test_a_role_can_be_deleted() {
        init_test_environment().await;
        let role = create_role("Editor").await;
        assert!(role_exists(&role.id).await);

        let outcome = delete_role_admin(&admin(), &role.id)
            .await
            .expect("delete should succeed");

        assert_eq!(outcome, RoleDeletionOutcome::Approved);
        assert!(!role_exists(&role.id).await);
    }

    #[tokio::test]
    #[serial]
    async fn test_the_admin_role_can_not_be_deleted() {
        init_test_environment().await;
        let role = RoleStore::get_role_by_name(ROLE_ADMIN_NAME.as_str())
            .await
            .expect("lookup should succeed")
            .expect("administrator role should be seeded");

        let outcome = delete_role_admin(&admin(), &role.id)
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::ProtectedRole)
        );
        assert_eq!(
            outcome.message(),
            Some("You can not delete the Administrator role.")
        );
        assert!(role_exists(&role.id).await);
    }

    #[tokio::test]
    #[serial]
    async fn test_a_role_with_assigned_users_cant_be_deleted() {
        init_test_environment().await;
        let role = create_role("Editor").await;
        RoleStore::assign_role(&role.id, "some-user")
            .await
            .expect("assign should succeed");

        let outcome = delete_role_admin(&admin(), &role.id)
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::HasAssignedUsers)
        );
        assert_eq!(
            outcome.message(),
            Some("You can not delete a role with associated users.")
        );
        assert!(role_exists(&role.id).await);
    }

    #[tokio::test]
    #[serial]
    async fn test_only_admin_can_delete_roles() {
        init_test_environment().await;
        let role = create_role("Editor").await;

        let outcome = delete_role_admin(&Actor::new("regular-user", false), &role.id)
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::NotAdministrator)
        );
        assert_eq!(outcome.message(), Some("You do not have access to do that."));
        assert!(role_exists(&role.id).await);
    }

    #[tokio::test]
    #[serial]
    async fn test_non_admin_denied_before_lookup() {
        init_test_environment().await;

        // A missing role still yields the access denial rather than not-found
        let outcome = delete_role_admin(&Actor::new("regular-user", false), "nonexistent-role")
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::NotAdministrator)
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_role_is_not_found() {
        init_test_environment().await;

        let result = delete_role_admin(&admin(), "nonexistent-role").await;

        match result {
            Err(CoordinationError::ResourceNotFound {
                resource_type,
                resource_id,
            }) => {
                assert_eq!(resource_type, "Role");
                assert_eq!(resource_id, "nonexistent-role");
            }
            other => panic!("Expected ResourceNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_policy_protects_other_role() {
        init_test_environment().await;
        let role = create_role("Owner").await;
        let policy = RoleDeletionPolicy::new(role.name.clone());

        let outcome = delete_role_admin_with_policy(&policy, &admin(), &role.id)
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::ProtectedRole)
        );
        assert!(role_exists(&role.id).await);
    }

    #[tokio::test]
    #[serial]
    async fn test_custom_policy_can_not_delete_reserved_role() {
        init_test_environment().await;
        let admin_role = RoleStore::get_role_by_name(ROLE_ADMIN_NAME.as_str())
            .await
            .expect("lookup should succeed")
            .expect("administrator role should be seeded");
        let policy = RoleDeletionPolicy::new("Owner");

        let outcome = delete_role_admin_with_policy(&policy, &admin(), &admin_role.id)
            .await
            .expect("evaluation should succeed");

        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::ProtectedRole)
        );
        assert!(role_exists(&admin_role.id).await);
    }

    #[test]
    fn test_outcome_for_deleted_role() {
        let outcome = outcome_for_delete_result(RoleDeleteResult::Deleted, "role-1")
            .expect("deleted maps to an outcome");
        assert_eq!(outcome, RoleDeletionOutcome::Approved);
    }

    #[test]
    fn test_outcome_when_assignment_won_the_race() {
        let outcome = outcome_for_delete_result(RoleDeleteResult::HasAssignments(1), "role-1")
            .expect("assignments map to an outcome");
        assert_eq!(
            outcome,
            RoleDeletionOutcome::Denied(DenialReason::HasAssignedUsers)
        );
    }

    #[test]
    fn test_outcome_when_role_vanished() {
        let result = outcome_for_delete_result(RoleDeleteResult::NotFound, "role-1");
        match result {
            Err(CoordinationError::ResourceNotFound {
                resource_type,
                resource_id,
            }) => {
                assert_eq!(resource_type, "Role");
                assert_eq!(resource_id, "role-1");
            }
            other => panic!("Expected ResourceNotFound, got {other:?}"),
        }
    }
}
