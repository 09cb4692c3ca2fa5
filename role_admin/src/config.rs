//! Central configuration for the role_admin crate

use std::sync::LazyLock;

const DEFAULT_ADMIN_ROLE_NAME: &str = "Administrator";

/// Name of the reserved administrator role
///
/// A role with exactly this name (case-sensitive) can never be deleted.
/// Default: "Administrator"
pub static ROLE_ADMIN_NAME: LazyLock<String> =
    LazyLock::new(|| admin_role_name_from(std::env::var("ROLE_ADMIN_NAME").ok()));

// Blank values fall back to the default so that an empty role name can never
// become the protected one.
fn admin_role_name_from(value: Option<String>) -> String {
    match value {
        Some(name) if !name.trim().is_empty() => name,
        _ => DEFAULT_ADMIN_ROLE_NAME.to_string(),
    }
}
