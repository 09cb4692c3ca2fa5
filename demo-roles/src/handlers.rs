use axum::{
    extract::Request,
    middleware::Next,
    response::{AppendHeaders, IntoResponse, Response},
};
use http::header::SET_COOKIE;

use role_admin_axum::{Actor, Flash, FlashLevel};

/// Stand-in for a real authentication layer
///
/// `X-Demo-User` names the actor (default "demo-user") and `X-Demo-Admin: true`
/// grants the administrator capability. Without either header the request is
/// anonymous.
pub(crate) async fn demo_authenticate(mut req: Request, next: Next) -> Response {
    let (user, is_admin) = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let user = header("X-Demo-User");
        let is_admin = header("X-Demo-Admin").is_some_and(|v| v.eq_ignore_ascii_case("true"));
        (user, is_admin)
    };

    if user.is_some() || is_admin {
        let actor = Actor::new(user.unwrap_or_else(|| "demo-user".to_string()), is_admin);
        tracing::debug!("Demo actor: {:?}", actor);
        req.extensions_mut().insert(actor);
    }

    next.run(req).await
}

pub(crate) async fn index(flash: Flash) -> impl IntoResponse {
    let body = match (flash.get(FlashLevel::Danger), flash.get(FlashLevel::Success)) {
        (Some(danger), _) => format!("Error: {danger}\n"),
        (None, Some(success)) => format!("{success}\n"),
        (None, None) => "Role administration demo\n".to_string(),
    };

    let clear: Vec<(http::HeaderName, String)> = flash
        .clear_cookies()
        .into_iter()
        .map(|cookie| (SET_COOKIE, cookie))
        .collect();

    (AppendHeaders(clear), body)
}
