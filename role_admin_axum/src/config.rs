//! Central configuration for the role_admin_axum crate

use std::sync::LazyLock;

const DEFAULT_ROUTE_PREFIX: &str = "/admin/auth/role";

/// Path under which the role administration router is expected to be mounted
/// Default: "/admin/auth/role"
pub static ROLE_ADMIN_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| route_prefix(std::env::var("ROLE_ADMIN_ROUTE_PREFIX").ok().as_deref()));

/// Where to send the browser after a deletion attempt by an administrator
/// Default: the route prefix, i.e. the role index
pub static ROLE_ADMIN_REDIRECT_INDEX: LazyLock<String> = LazyLock::new(|| {
    redirect_index(
        &ROLE_ADMIN_ROUTE_PREFIX,
        std::env::var("ROLE_ADMIN_REDIRECT_INDEX").ok().as_deref(),
    )
});

/// Where to send a user who lacks the administrator capability
/// Default: "/"
pub static ROLE_ADMIN_REDIRECT_DENIED: LazyLock<String> = LazyLock::new(|| {
    redirect_denied(std::env::var("ROLE_ADMIN_REDIRECT_DENIED").ok().as_deref())
});

fn route_prefix(env_value: Option<&str>) -> String {
    env_value.unwrap_or(DEFAULT_ROUTE_PREFIX).to_string()
}

fn redirect_index(route_prefix: &str, env_value: Option<&str>) -> String {
    env_value.unwrap_or(route_prefix).to_string()
}

fn redirect_denied(env_value: Option<&str>) -> String {
    env_value.unwrap_or("/").to_string()
}
