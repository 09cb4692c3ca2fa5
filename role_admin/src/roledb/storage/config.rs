use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Roles table name
pub(super) static DB_TABLE_ROLES: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_ROLES").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "roles"))
});

/// User-to-role assignments table name
pub(super) static DB_TABLE_ROLE_ASSIGNMENTS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_ROLE_ASSIGNMENTS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "role_assignments"))
});
