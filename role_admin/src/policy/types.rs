use std::fmt;

use serde::{Deserialize, Serialize};

/// The principal performing a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Unique user identifier
    pub id: String,
    /// Whether the actor holds the administrator capability
    pub is_admin: bool,
}

impl Actor {
    pub fn new(id: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: id.into(),
            is_admin,
        }
    }
}

/// Why a role deletion was refused
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    NotAdministrator,
    ProtectedRole,
    HasAssignedUsers,
}

impl DenialReason {
    /// User-facing message, also used as the `Display` output
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAdministrator => "You do not have access to do that.",
            Self::ProtectedRole => "You can not delete the Administrator role.",
            Self::HasAssignedUsers => "You can not delete a role with associated users.",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for DenialReason {}

/// Result of evaluating a role deletion request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum RoleDeletionOutcome {
    /// The caller may go ahead and remove the role
    Approved,
    Denied(DenialReason),
}

impl RoleDeletionOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Approved => None,
            Self::Denied(reason) => Some(*reason),
        }
    }

    /// User-facing message for a denial, `None` when approved
    pub fn message(&self) -> Option<&'static str> {
        self.denial().map(|reason| reason.message())
    }
}

impl From<DenialReason> for RoleDeletionOutcome {
    fn from(reason: DenialReason) -> Self {
        Self::Denied(reason)
    }
}
