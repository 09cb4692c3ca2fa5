//! Router for role administration endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create the role administration router
///
/// Mount it under [`ROLE_ADMIN_ROUTE_PREFIX`](crate::ROLE_ADMIN_ROUTE_PREFIX):
/// - `DELETE {ROLE_ADMIN_ROUTE_PREFIX}/{role_id}`
///
/// An upstream authentication layer must insert the requesting
/// [`Actor`](crate::Actor) into the request extensions.
pub fn role_admin_router() -> Router {
    role_admin_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`role_admin_router`] without the HTTP tracing middleware
pub fn role_admin_router_no_trace() -> Router {
    super::admin::router()
}
