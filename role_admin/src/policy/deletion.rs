use crate::config::ROLE_ADMIN_NAME;
use crate::roledb::Role;

use super::types::{Actor, DenialReason, RoleDeletionOutcome};

/// Decides whether a role may be deleted
///
/// Checks run in a fixed order and the first failing one wins:
/// 1. the actor must be an administrator
/// 2. the role must not be the reserved administrator role
/// 3. no user may currently hold the role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDeletionPolicy {
    admin_role_name: String,
}

impl RoleDeletionPolicy {
    pub fn new(admin_role_name: impl Into<String>) -> Self {
        Self {
            admin_role_name: admin_role_name.into(),
        }
    }

    /// Policy protecting the role named by `ROLE_ADMIN_NAME`
    pub fn from_config() -> Self {
        Self::new(ROLE_ADMIN_NAME.as_str())
    }

    pub fn admin_role_name(&self) -> &str {
        &self.admin_role_name
    }

    /// The capability gate on its own, usable before the role is even looked up
    pub fn check_actor(&self, actor: &Actor) -> Result<(), DenialReason> {
        if !actor.is_admin {
            tracing::debug!("Actor {} lacks the administrator capability", actor.id);
            return Err(DenialReason::NotAdministrator);
        }
        Ok(())
    }

    pub fn evaluate(
        &self,
        actor: &Actor,
        role: &Role,
        assignment_count: u64,
    ) -> RoleDeletionOutcome {
        if let Err(reason) = self.check_actor(actor) {
            return reason.into();
        }

        if role.is_protected(&self.admin_role_name) {
            tracing::debug!("Role {} is the protected administrator role", role.id);
            return DenialReason::ProtectedRole.into();
        }

        if assignment_count > 0 {
            tracing::debug!(
                "Role {} is still assigned to {} user(s)",
                role.id,
                assignment_count
            );
            return DenialReason::HasAssignedUsers.into();
        }

        RoleDeletionOutcome::Approved
    }
}

/// Evaluate a deletion against the configured administrator role name
pub fn evaluate_role_deletion(
    actor: &Actor,
    role: &Role,
    assignment_count: u64,
) -> RoleDeletionOutcome {
    RoleDeletionPolicy::from_config().evaluate(actor, role, assignment_count)
}
