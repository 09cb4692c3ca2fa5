//! Test utilities module for shared test initialization and helpers
//!
//! All tests that touch the database share the process-wide data store, so
//! they are marked `#[serial]` and call [`init_test_environment`] first.

use std::sync::Once;

/// Centralized test initialization for all tests across the crate
///
/// 1. Loads `.env_test` (falling back to `.env`) once
/// 2. Removes a stale SQLite test database left by an earlier run
/// 3. Initializes the role tables and seeds the administrator role
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if let Some(db_path) = extract_sqlite_file_path() {
            // Missing file is fine
            let _ = std::fs::remove_file(&db_path);
        }
    });

    if let Err(e) = crate::roledb::RoleStore::init().await {
        eprintln!("Warning: Failed to initialize RoleStore: {e}");
    }
}

/// Role name that will not collide with roles created by other tests
pub fn unique_role_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

/// Extract the file path from a SQLite database URL
///
/// Returns None for non-SQLite URLs and in-memory databases.
fn extract_sqlite_file_path_from_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("file:").unwrap_or(path);
    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split('?').next()?;

    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(path.to_string())
}

fn extract_sqlite_file_path() -> Option<String> {
    std::env::var("GENERIC_DATA_STORE_URL")
        .ok()
        .and_then(|url| extract_sqlite_file_path_from_url(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_from_url() {
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:/tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:./test.db"),
            Some("./test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:/tmp/test.db?mode=rwc"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:///tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(extract_sqlite_file_path_from_url("sqlite::memory:"), None);
        assert_eq!(
            extract_sqlite_file_path_from_url("postgresql://localhost/test"),
            None
        );
        assert_eq!(extract_sqlite_file_path_from_url(""), None);
    }

    #[test]
    fn test_unique_role_name() {
        let a = unique_role_name("Editor");
        let b = unique_role_name("Editor");
        assert!(a.starts_with("Editor-"));
        assert_ne!(a, b);
    }
}
