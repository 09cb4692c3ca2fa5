//! One-shot flash messages carried in cookies
//!
//! A handler answers with a [`FlashRedirect`]; the page it redirects to reads
//! the message back with the [`Flash`] extractor and clears it with
//! [`Flash::clear_cookies`].

use std::convert::Infallible;

use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{HeaderValue, header::SET_COOKIE, request::Parts};

const FLASH_MAX_AGE_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Danger,
    Success,
}

impl FlashLevel {
    const ALL: [FlashLevel; 2] = [FlashLevel::Danger, FlashLevel::Success];

    pub fn cookie_name(&self) -> &'static str {
        match self {
            FlashLevel::Danger => "flash_danger",
            FlashLevel::Success => "flash_success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value carrying this message
    pub fn set_cookie(&self) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.level.cookie_name(),
            urlencoding::encode(&self.message),
            FLASH_MAX_AGE_SECS
        )
    }
}

/// A 303 redirect that leaves a flash message for the next page
#[derive(Debug, Clone)]
pub struct FlashRedirect {
    pub location: String,
    pub flash: FlashMessage,
}

impl FlashRedirect {
    pub fn new(location: impl Into<String>, flash: FlashMessage) -> Self {
        Self {
            location: location.into(),
            flash,
        }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();
        match HeaderValue::from_str(&self.flash.set_cookie()) {
            Ok(cookie) => {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            // urlencoding leaves only header-safe characters, so this is not expected
            Err(e) => tracing::error!("Failed to build flash cookie: {}", e),
        }
        response
    }
}

/// Flash messages present on the incoming request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(pub Vec<FlashMessage>);

impl Flash {
    pub fn get(&self, level: FlashLevel) -> Option<&str> {
        self.0
            .iter()
            .find(|flash| flash.level == level)
            .map(|flash| flash.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Set-Cookie` values expiring every flash cookie that was read
    pub fn clear_cookies(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|flash| {
                format!(
                    "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
                    flash.level.cookie_name()
                )
            })
            .collect()
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(cookies)) = parts.extract::<TypedHeader<headers::Cookie>>().await
        else {
            return Ok(Flash::default());
        };

        let messages = FlashLevel::ALL
            .iter()
            .filter_map(|level| {
                let raw = cookies.get(level.cookie_name())?;
                match urlencoding::decode(raw) {
                    Ok(message) => Some(FlashMessage {
                        level: *level,
                        message: message.into_owned(),
                    }),
                    Err(e) => {
                        tracing::warn!("Ignoring undecodable {} cookie: {}", level.cookie_name(), e);
                        None
                    }
                }
            })
            .collect();

        Ok(Flash(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Request, StatusCode, header::LOCATION};

    #[test]
    fn test_set_cookie_encodes_message() {
        let flash = FlashMessage::danger("You can not delete the Administrator role.");
        assert_eq!(
            flash.set_cookie(),
            "flash_danger=You%20can%20not%20delete%20the%20Administrator%20role.; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
    }

    #[test]
    fn test_flash_redirect_response() {
        let response = FlashRedirect::new(
            "/admin/auth/role",
            FlashMessage::success("The role was successfully deleted."),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/admin/auth/role");
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("flash_success=The%20role%20was%20successfully%20deleted."));
    }

    #[tokio::test]
    async fn test_flash_extractor_reads_cookies() {
        let request = Request::builder()
            .uri("/admin/auth/role")
            .header(
                "cookie",
                "session=abc; flash_danger=You%20do%20not%20have%20access%20to%20do%20that.",
            )
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let Ok(flash) = Flash::from_request_parts(&mut parts, &()).await;

        assert_eq!(
            flash.get(FlashLevel::Danger),
            Some("You do not have access to do that.")
        );
        assert_eq!(flash.get(FlashLevel::Success), None);
        assert_eq!(
            flash.clear_cookies(),
            vec!["flash_danger=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_flash_extractor_without_cookies() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let Ok(flash) = Flash::from_request_parts(&mut parts, &()).await;

        assert!(flash.is_empty());
        assert!(flash.clear_cookies().is_empty());
    }
}
