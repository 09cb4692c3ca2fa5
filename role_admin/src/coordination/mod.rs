//! Role administration coordination
//!
//! Glues the deletion policy to the role store: resolves the role, counts its
//! assignments, asks the policy and performs the delete when approved.

mod admin;
mod errors;

pub use admin::{delete_role_admin, delete_role_admin_with_policy};
pub use errors::CoordinationError;
