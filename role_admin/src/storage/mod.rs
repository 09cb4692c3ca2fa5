mod data_store;
mod errors;
mod schema_validation;

pub(crate) use data_store::{DB_TABLE_PREFIX, data_store};
pub use errors::StorageError;
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};

/// Connect the generic data store, surfacing configuration problems early
pub async fn init() -> Result<(), StorageError> {
    let _store = data_store().await?;
    Ok(())
}
