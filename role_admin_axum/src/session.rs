use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Redirect, Response},
};
use http::{Method, StatusCode, request::Parts};

use role_admin::Actor;

use super::config::ROLE_ADMIN_REDIRECT_DENIED;

pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    fn new(method: Method) -> Self {
        Self { method }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", ROLE_ADMIN_REDIRECT_DENIED.as_str());
            Redirect::temporary(ROLE_ADMIN_REDIRECT_DENIED.as_str()).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// The authenticated principal behind a request, available as an Axum extractor
///
/// Authentication itself happens upstream: the application's auth middleware
/// resolves the logged-in user and inserts an [`Actor`] into the request
/// extensions. Requests without one are rejected with 401 (or redirected for
/// GET).
///
/// # Example
///
/// ```no_run
/// use axum::{Router, extract::Request, middleware::{self, Next}, response::Response};
/// use role_admin_axum::{Actor, ROLE_ADMIN_ROUTE_PREFIX, role_admin_router};
///
/// async fn authenticate(mut req: Request, next: Next) -> Response {
///     req.extensions_mut().insert(Actor::new("user-1", true));
///     next.run(req).await
/// }
///
/// let app: Router = Router::new()
///     .nest(ROLE_ADMIN_ROUTE_PREFIX.as_str(), role_admin_router())
///     .layer(middleware::from_fn(authenticate));
/// ```
#[derive(Clone, Debug)]
pub struct AuthActor(pub Actor);

impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Actor>() {
            Some(actor) => Ok(AuthActor(actor.clone())),
            None => {
                tracing::warn!("No authenticated actor on {} {}", parts.method, parts.uri);
                Err(AuthRedirect::new(parts.method.clone()))
            }
        }
    }
}
