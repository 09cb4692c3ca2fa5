use sqlx::{Pool, Sqlite};

use crate::roledb::{
    errors::RoleError,
    types::{Role, RoleDeleteResult, RoleSearchField},
};
use crate::storage::validate_sqlite_table_schema;

use super::assignment_count;
use super::config::{DB_TABLE_ROLE_ASSIGNMENTS, DB_TABLE_ROLES};

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), RoleError> {
    let roles_table = DB_TABLE_ROLES.as_str();
    let assignments_table = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {roles_table} (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            guard_name TEXT NOT NULL DEFAULT 'web',
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {assignments_table} (
            role_id TEXT NOT NULL REFERENCES {roles_table}(id),
            user_id TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL,
            PRIMARY KEY (role_id, user_id)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn validate_role_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), RoleError> {
    let roles_columns = [
        ("id", "TEXT"),
        ("name", "TEXT"),
        ("guard_name", "TEXT"),
        ("created_at", "TIMESTAMP"),
        ("updated_at", "TIMESTAMP"),
    ];
    validate_sqlite_table_schema(
        pool,
        DB_TABLE_ROLES.as_str(),
        &roles_columns,
        RoleError::Storage,
    )
    .await?;

    let assignments_columns = [
        ("role_id", "TEXT"),
        ("user_id", "TEXT"),
        ("created_at", "TIMESTAMP"),
    ];
    validate_sqlite_table_schema(
        pool,
        DB_TABLE_ROLE_ASSIGNMENTS.as_str(),
        &assignments_columns,
        RoleError::Storage,
    )
    .await
}

pub(super) async fn get_role_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &RoleSearchField,
) -> Result<Option<Role>, RoleError> {
    // Tables may not exist yet on a fresh in-memory database
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_ROLES.as_str();
    let (column, value) = match field {
        RoleSearchField::Id(id) => ("id", id),
        RoleSearchField::Name(name) => ("name", name),
    };

    sqlx::query_as::<_, Role>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE {column} = ?
        "#
    ))
    .bind(value)
    .fetch_optional(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))
}

pub(super) async fn insert_role_sqlite(pool: &Pool<Sqlite>, role: Role) -> Result<Role, RoleError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_ROLES.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, name, guard_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#
    ))
    .bind(&role.id)
    .bind(&role.name)
    .bind(&role.guard_name)
    .bind(role.created_at)
    .bind(role.updated_at)
    .execute(pool)
    .await?;

    Ok(role)
}

pub(super) async fn assign_role_sqlite(
    pool: &Pool<Sqlite>,
    role_id: &str,
    user_id: &str,
) -> Result<(), RoleError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (role_id, user_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT (role_id, user_id) DO NOTHING
        "#
    ))
    .bind(role_id)
    .bind(user_id)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn count_assignments_sqlite(
    pool: &Pool<Sqlite>,
    role_id: &str,
) -> Result<i64, RoleError> {
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) FROM {table_name} WHERE role_id = ?
        "#
    ))
    .bind(role_id)
    .fetch_one(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))
}

pub(super) async fn delete_role_if_unassigned_sqlite(
    pool: &Pool<Sqlite>,
    role_id: &str,
) -> Result<RoleDeleteResult, RoleError> {
    create_tables_sqlite(pool).await?;

    let roles_table = DB_TABLE_ROLES.as_str();
    let assignments_table = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    let mut tx = pool.begin().await?;

    // Check and delete in one statement so no assignment can slip in between
    let deleted = sqlx::query(&format!(
        r#"
        DELETE FROM {roles_table}
        WHERE id = ?
          AND NOT EXISTS (SELECT 1 FROM {assignments_table} WHERE role_id = ?)
        "#
    ))
    .bind(role_id)
    .bind(role_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if deleted > 0 {
        tx.commit().await?;
        return Ok(RoleDeleteResult::Deleted);
    }

    let exists = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) FROM {roles_table} WHERE id = ?
        "#
    ))
    .bind(role_id)
    .fetch_one(&mut *tx)
    .await?;

    if exists == 0 {
        tx.rollback().await?;
        return Ok(RoleDeleteResult::NotFound);
    }

    let count = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) FROM {assignments_table} WHERE role_id = ?
        "#
    ))
    .bind(role_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.rollback().await?;

    Ok(RoleDeleteResult::HasAssignments(assignment_count(count)?))
}
