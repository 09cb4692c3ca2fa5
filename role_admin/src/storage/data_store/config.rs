//! Data store selection and table configuration

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::{Mutex, MutexGuard};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::errors::StorageError;

type SharedDataStore = Mutex<Box<dyn DataStore>>;

static GENERIC_DATA_STORE: LazyLock<Result<SharedDataStore, StorageError>> =
    LazyLock::new(|| -> Result<SharedDataStore, StorageError> {
    let store_type = env::var("GENERIC_DATA_STORE_TYPE")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_TYPE must be set".to_string()))?;
    let store_url = env::var("GENERIC_DATA_STORE_URL")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_URL must be set".to_string()))?;

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = connect_data_store(&store_type, &store_url)?;

    tracing::info!(
        "Connected to database: type={}, url={}",
        store_type,
        store_url
    );

    Ok(Mutex::new(store))
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "rbac_".to_string()));

/// Lock the process-wide data store
///
/// The pool is created lazily from `GENERIC_DATA_STORE_TYPE` and
/// `GENERIC_DATA_STORE_URL` on first use.
pub(crate) async fn data_store() -> Result<MutexGuard<'static, Box<dyn DataStore>>, StorageError> {
    match &*GENERIC_DATA_STORE {
        Ok(store) => Ok(store.lock().await),
        Err(e) => Err(e.clone()),
    }
}

fn connect_data_store(store_type: &str, store_url: &str) -> Result<Box<dyn DataStore>, StorageError> {
    match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .map_err(|e| {
                    StorageError::Config(format!("Failed to parse SQLite connection string: {e}"))
                })?
                .create_if_missing(true);

            Ok(Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }))
        }
        "postgres" => {
            let pool = sqlx::PgPool::connect_lazy(store_url).map_err(|e| {
                StorageError::Config(format!("Failed to create Postgres pool: {e}"))
            })?;
            Ok(Box::new(PostgresDataStore { pool }))
        }
        t => Err(StorageError::Config(format!(
            "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
        ))),
    }
}
