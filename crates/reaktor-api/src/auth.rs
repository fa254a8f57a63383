//! # Authentication & Submitter Identity
//!
//! Two separate concerns live here:
//!
//! - **Service access.** When `AUTH_TOKEN` is configured, every `/incidencias`
//!   route requires `Authorization: Bearer <token>`. When it is not, the
//!   routes are open.
//! - **Submitter.** The professor filing an issue is identified by the
//!   `professorMail` request header, extracted as [`Submitter`]. On create
//!   the header, not the body, decides whose issue it is.

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use subtle::ConstantTimeEq;

use crate::error::{AppError, ErrorBody, ErrorDetail};

/// Name of the header carrying the submitting professor's mail.
pub const SUBMITTER_HEADER: &str = "professormail";

// ── Submitter ───────────────────────────────────────────────────────────────

/// Mail of the professor submitting the request, from the `professorMail`
/// header.
///
/// Only presence is checked here; whether the mail may submit issues is
/// decided by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter(pub String);

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for Submitter {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SUBMITTER_HEADER)
            .ok_or_else(|| AppError::BadRequest("missing professorMail header".into()))?;
        let mail = value
            .to_str()
            .map_err(|_| AppError::BadRequest("professorMail header is not valid text".into()))?;
        Ok(Self(mail.to_string()))
    }
}

// ── Auth Configuration ──────────────────────────────────────────────────────

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Constant-time comparison of bearer tokens.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Reject requests without the configured bearer token.
///
/// Passes every request through when no token is configured.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|c| c.token.clone());

    let Some(expected) = expected else {
        return next.run(request).await;
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(value) if value.starts_with("Bearer ") => {
            if constant_time_token_eq(&value[7..], &expected) {
                next.run(request).await
            } else {
                tracing::warn!("authentication failed: invalid bearer token");
                unauthorized_response("invalid bearer token")
            }
        }
        Some(_) => {
            tracing::warn!("authentication failed: non-Bearer authorization scheme");
            unauthorized_response("authorization header must use Bearer scheme")
        }
        None => {
            tracing::warn!("authentication failed: missing authorization header");
            unauthorized_response("missing authorization header")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            details: None,
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
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

    /// Build a minimal router with the auth middleware and a simple handler.
    fn test_app(token: Option<String>) -> Router {
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .route(
                "/whoami",
                get(|Submitter(mail): Submitter| async move { mail }),
            )
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(AuthConfig { token }))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_bearer_token_accepted() {
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer my-secret")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(Some("my-secret".into())), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn missing_authorization_header_rejected() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(Some("my-secret".into())), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let err: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
        assert!(err["error"]["message"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn invalid_token_rejected() {
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer wrong")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(test_app(Some("my-secret".into())), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(Some("my-secret".into())), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Bearer scheme"));
    }

    #[tokio::test]
    async fn auth_disabled_allows_all_requests() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(None), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn submitter_header_is_case_insensitive() {
        let request = Request::builder()
            .uri("/whoami")
            .header("professorMail", "j.smith@school.org")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(None), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "j.smith@school.org");
    }

    #[tokio::test]
    async fn missing_submitter_header_is_bad_request() {
        let request = Request::builder().uri("/whoami").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(None), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("professorMail"));
    }

    #[test]
    fn constant_time_eq_cases() {
        assert!(constant_time_token_eq("abc", "abc"));
        assert!(!constant_time_token_eq("abc", "abd"));
        assert!(!constant_time_token_eq("abc", "abcd"));
    }

    #[test]
    fn auth_config_debug_redacts_token() {
        let config = AuthConfig {
            token: Some("super-secret".into()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
