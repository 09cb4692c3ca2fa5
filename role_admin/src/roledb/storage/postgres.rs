use sqlx::{Pool, Postgres};

use crate::roledb::{
    errors::RoleError,
    types::{Role, RoleDeleteResult, RoleSearchField},
};
use crate::storage::validate_postgres_table_schema;

use super::assignment_count;
use super::config::{DB_TABLE_ROLE_ASSIGNMENTS, DB_TABLE_ROLES};

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), RoleError> {
    let roles_table = DB_TABLE_ROLES.as_str();
    let assignments_table = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {roles_table} (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            guard_name TEXT NOT NULL DEFAULT 'web',
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
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
            created_at TIMESTAMPTZ NOT NULL,
            PRIMARY KEY (role_id, user_id)
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn validate_role_tables_postgres(pool: &Pool<Postgres>) -> Result<(), RoleError> {
    let roles_columns = [
        ("id", "text"),
        ("name", "text"),
        ("guard_name", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_ROLES.as_str(),
        &roles_columns,
        RoleError::Storage,
    )
    .await?;

    let assignments_columns = [
        ("role_id", "text"),
        ("user_id", "text"),
        ("created_at", "timestamp with time zone"),
    ];
    validate_postgres_table_schema(
        pool,
        DB_TABLE_ROLE_ASSIGNMENTS.as_str(),
        &assignments_columns,
        RoleError::Storage,
    )
    .await
}

pub(super) async fn get_role_by_field_postgres(
    pool: &Pool<Postgres>,
    field: &RoleSearchField,
) -> Result<Option<Role>, RoleError> {
    let table_name = DB_TABLE_ROLES.as_str();
    let (column, value) = match field {
        RoleSearchField::Id(id) => ("id", id),
        RoleSearchField::Name(name) => ("name", name),
    };

    sqlx::query_as::<_, Role>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE {column} = $1
        "#
    ))
    .bind(value)
    .fetch_optional(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))
}

pub(super) async fn insert_role_postgres(
    pool: &Pool<Postgres>,
    role: Role,
) -> Result<Role, RoleError> {
    let table_name = DB_TABLE_ROLES.as_str();

    let inserted = sqlx::query_as::<_, Role>(&format!(
        r#"
        INSERT INTO {table_name} (id, name, guard_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#
    ))
    .bind(&role.id)
    .bind(&role.name)
    .bind(&role.guard_name)
    .bind(role.created_at)
    .bind(role.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(inserted)
}

pub(super) async fn assign_role_postgres(
    pool: &Pool<Postgres>,
    role_id: &str,
    user_id: &str,
) -> Result<(), RoleError> {
    let table_name = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (role_id, user_id, created_at)
        VALUES ($1, $2, $3)
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

pub(super) async fn count_assignments_postgres(
    pool: &Pool<Postgres>,
    role_id: &str,
) -> Result<i64, RoleError> {
    let table_name = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) FROM {table_name} WHERE role_id = $1
        "#
    ))
    .bind(role_id)
    .fetch_one(pool)
    .await
    .map_err(|e| RoleError::Storage(e.to_string()))
}

pub(super) async fn delete_role_if_unassigned_postgres(
    pool: &Pool<Postgres>,
    role_id: &str,
) -> Result<RoleDeleteResult, RoleError> {
    let roles_table = DB_TABLE_ROLES.as_str();
    let assignments_table = DB_TABLE_ROLE_ASSIGNMENTS.as_str();

    let mut tx = pool.begin().await?;

    // Lock the role row; new assignments need a key-share lock on it through the foreign key
    let locked: Option<String> = sqlx::query_scalar(&format!(
        r#"
        SELECT id FROM {roles_table} WHERE id = $1 FOR UPDATE
        "#
    ))
    .bind(role_id)
    .fetch_optional(&mut *tx)
    .await?;

    if locked.is_none() {
        tx.rollback().await?;
        return Ok(RoleDeleteResult::NotFound);
    }

    let count = sqlx::query_scalar::<_, i64>(&format!(
        r#"
        SELECT COUNT(*) FROM {assignments_table} WHERE role_id = $1
        "#
    ))
    .bind(role_id)
    .fetch_one(&mut *tx)
    .await?;

    if count > 0 {
        tx.rollback().await?;
        return Ok(RoleDeleteResult::HasAssignments(assignment_count(count)?));
    }

    sqlx::query(&format!(
        r#"
        DELETE FROM {roles_table} WHERE id = $1
        "#
    ))
    .bind(role_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(RoleDeleteResult::Deleted)
}
