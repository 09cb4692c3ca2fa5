mod config;
mod postgres;
mod sqlite;
mod store_type;

pub use store_type::RoleStore;

use crate::roledb::errors::RoleError;

/// Convert a SQL `COUNT(*)` into an assignment count
fn assignment_count(count: i64) -> Result<u64, RoleError> {
    u64::try_from(count)
        .map_err(|_| RoleError::InvalidData(format!("Negative assignment count: {count}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_count() {
        assert_eq!(assignment_count(0), Ok(0));
        assert_eq!(assignment_count(3), Ok(3));
        assert!(matches!(
            assignment_count(-1),
            Err(RoleError::InvalidData(_))
        ));
    }
}
