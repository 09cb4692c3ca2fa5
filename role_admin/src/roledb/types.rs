use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Guard assigned to roles created without an explicit one
pub const DEFAULT_GUARD_NAME: &str = "web";

/// A named permission grouping assignable to users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Role {
    /// Unique role identifier
    pub id: String,
    /// Unique role name
    pub name: String,
    /// Authentication guard the role belongs to
    pub guard_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            guard_name: DEFAULT_GUARD_NAME.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this is the reserved role named `admin_role_name`
    ///
    /// The comparison is exact and case-sensitive.
    pub fn is_protected(&self, admin_role_name: &str) -> bool {
        self.name == admin_role_name
    }
}

#[derive(Debug, Clone)]
pub enum RoleSearchField {
    Id(String),
    Name(String),
}

impl fmt::Display for RoleSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleSearchField::Id(id) => write!(f, "id={id}"),
            RoleSearchField::Name(name) => write!(f, "name={name}"),
        }
    }
}

/// What happened to a guarded delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDeleteResult {
    Deleted,
    /// The role still had this many assignments, nothing was removed
    HasAssignments(u64),
    NotFound,
}
