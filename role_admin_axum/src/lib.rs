//! role_admin_axum - Axum integration for role_admin
//!
//! Exposes the role deletion endpoint, an extractor for the authenticated
//! actor and cookie-based flash messages for reporting the outcome.

mod admin;
mod config;
mod error;
mod flash;
mod router;
mod session;

pub use config::{ROLE_ADMIN_REDIRECT_DENIED, ROLE_ADMIN_REDIRECT_INDEX, ROLE_ADMIN_ROUTE_PREFIX};
pub use flash::{Flash, FlashLevel, FlashMessage, FlashRedirect};
pub use router::{role_admin_router, role_admin_router_no_trace};
pub use session::{AuthActor, AuthRedirect};

// Re-export the core types and initialization function from role_admin
pub use role_admin::{Actor, DenialReason, ROLE_ADMIN_NAME, RoleDeletionOutcome, init};
