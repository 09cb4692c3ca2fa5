mod config;
mod types;

pub(crate) use config::{DB_TABLE_PREFIX, data_store};
