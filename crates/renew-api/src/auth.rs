//! # Authentication Middleware
//!
//! Resolves the current user from a bearer token and injects a
//! [`CurrentUser`] into request extensions. Handlers that need a user take
//! `CurrentUser` as an extractor; without one the request is rejected with
//! 401 before any renewal logic runs.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {user_id}:{secret}  : when AUTH_TOKEN is configured
//! Bearer {user_id}           : development mode (no secret configured)
//! ```
//!
//! Secrets are compared in constant time.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use renew_core::UserId;
use subtle::ConstantTimeEq;

use crate::error::{AppError, ErrorBody};

/// The authenticated user for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("no authenticated user".into()))
    }
}

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the secret.
#[derive(Clone, Default)]
pub struct AuthConfig {
    pub secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    let id: i64 = raw
        .parse()
        .map_err(|e| format!("invalid user id {raw:?}: {e}"))?;
    match UserId::new(id) {
        Ok(user) if user.get() != 0 => Ok(user),
        _ => Err(format!("invalid user id {raw:?}")),
    }
}

/// Parse a bearer token into the user it authenticates.
///
/// With `expected_secret = None` the token is just a user id.
pub fn parse_bearer_token(provided: &str, expected_secret: Option<&str>) -> Result<CurrentUser, String> {
    let (user_part, secret_part) = match provided.split_once(':') {
        Some((user, secret)) => (user, Some(secret)),
        None => (provided, None),
    };

    if let Some(expected) = expected_secret {
        match secret_part {
            Some(secret) if constant_time_eq(secret, expected) => {}
            Some(_) => return Err("invalid bearer token".into()),
            None => {
                return Err("invalid token format, expected {user_id}:{secret}".into());
            }
        }
    }

    Ok(CurrentUser {
        user_id: parse_user_id(user_part)?,
    })
}

/// Validate the `Authorization` header and inject [`CurrentUser`].
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let config = request
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(value) => match value.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                tracing::warn!("authentication failed: non-Bearer authorization scheme");
                return unauthorized_response("authorization header must use Bearer scheme");
            }
        },
        None => {
            tracing::warn!("authentication failed: missing authorization header");
            return unauthorized_response("missing authorization header");
        }
    };

    match parse_bearer_token(token, config.secret.as_deref()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(msg) => {
            tracing::warn!(reason = %msg, "authentication failed");
            unauthorized_response(&msg)
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("UNAUTHORIZED", message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app(secret: Option<&str>) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|user: CurrentUser| async move { user.user_id.get().to_string() }),
            )
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(AuthConfig {
                secret: secret.map(String::from),
            }))
    }

    async fn call(app: Router, auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_yields_user() {
        let (status, body) = call(test_app(Some("s3cret")), Some("Bearer 42:s3cret")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn wrong_secret_rejected() {
        let (status, body) = call(test_app(Some("s3cret")), Some("Bearer 42:nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("invalid bearer token"));
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let (status, body) = call(test_app(Some("s3cret")), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("missing"));
    }

    #[tokio::test]
    async fn non_bearer_rejected() {
        let (status, body) = call(test_app(None), Some("Basic dXNlcjpwYXNz")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Bearer scheme"));
    }

    #[tokio::test]
    async fn dev_mode_accepts_bare_user_id() {
        let (status, body) = call(test_app(None), Some("Bearer 7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[test]
    fn secret_required_when_configured() {
        assert!(parse_bearer_token("7", Some("s3cret")).is_err());
    }

    #[test]
    fn zero_and_negative_user_rejected() {
        assert!(parse_bearer_token("0", None).is_err());
        assert!(parse_bearer_token("-3", None).is_err());
        assert!(parse_bearer_token("abc", None).is_err());
    }

    #[test]
    fn secret_may_contain_colons() {
        let user = parse_bearer_token("9:a:b", Some("a:b")).unwrap();
        assert_eq!(user.user_id, UserId(9));
    }

    #[test]
    fn debug_redacts_secret() {
        let dbg = format!("{:?}", AuthConfig { secret: Some("hunter2".into()) });
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("REDACTED"));
    }
}
