mod errors;
mod storage;
mod types;

pub use errors::RoleError;
pub use storage::RoleStore;
pub use types::{Role, RoleDeleteResult, RoleSearchField};

pub async fn init() -> Result<(), RoleError> {
    RoleStore::init().await
}
