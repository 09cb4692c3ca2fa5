use axum::{Router, middleware, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use role_admin::{RoleError, RoleStore};
use role_admin_axum::{ROLE_ADMIN_ROUTE_PREFIX, role_admin_router};

mod handlers;

use crate::handlers::{demo_authenticate, index};

const DEMO_ROLES: [&str; 2] = ["Editor", "Viewer"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,role_admin=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    role_admin_axum::init().await?;
    seed_demo_roles().await?;

    let app = Router::new()
        .route("/", get(index))
        .nest(ROLE_ADMIN_ROUTE_PREFIX.as_str(), role_admin_router())
        .layer(middleware::from_fn(demo_authenticate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed_demo_roles() -> Result<(), RoleError> {
    for name in DEMO_ROLES {
        let role = match RoleStore::create_role(name).await {
            Ok(role) => role,
            Err(RoleError::Conflict(_)) => match RoleStore::get_role_by_name(name).await? {
                Some(role) => role,
                None => continue,
            },
            Err(e) => return Err(e),
        };
        tracing::info!(
            "Role '{}' can be deleted with: curl -X DELETE -H 'X-Demo-Admin: true' http://127.0.0.1:3001{}/{}",
            role.name,
            ROLE_ADMIN_ROUTE_PREFIX.as_str(),
            role.id
        );
    }

    if let Some(viewer) = RoleStore::get_role_by_name("Viewer").await? {
        RoleStore::assign_role(&viewer.id, "demo-viewer").await?;
    }
    Ok(())
}
