use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid authentication credentials")]
    InvalidToken,
}

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
}

/// Verifies the bearer token of an inbound request
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Accepts a fixed set of tokens, each mapped to a subject name
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    /// Subjects are numbered `client-1`, `client-2`, ... in input order
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.is_empty())
            .enumerate()
            .map(|(i, token)| (token, format!("client-{}", i + 1)))
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens
            .get(token)
            .map(|subject| Principal {
                subject: subject.clone(),
            })
            .ok_or(AuthError::InvalidToken)
    }
}

/// Error body, same shape as the API's other errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(body),
        )
            .into_response()
    }
}

fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.trim())
}

/// Middleware rejecting requests without a valid bearer token.
/// On success the [`Principal`] is stored in the request extensions.
pub async fn require_bearer(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = match bearer_token(&request).and_then(|token| verifier.verify(token)) {
        Ok(principal) => principal,
        Err(e) => {
            warn!(path = %request.uri().path(), error = %e, "rejected request");
            return Err(e);
        }
    };

    debug!(subject = %principal.subject, "authenticated request");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(["s3cret", "other"]));
        Router::new()
            .route(
                "/whoami",
                get(|Extension(p): Extension<Principal>| async move { p.subject }),
            )
            .layer(middleware::from_fn_with_state(verifier, require_bearer))
    }

    async fn call(authorization: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        app().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let response = call(None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        assert_eq!(call(Some("Bearer nope")).await.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(call(Some("Basic s3cret")).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_principal() {
        let response = call(Some("Bearer other")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"client-2");
    }

    #[test]
    fn empty_tokens_are_ignored() {
        let verifier = StaticTokenVerifier::new(["", "a"]);
        assert_eq!(verifier.verify(""), Err(AuthError::InvalidToken));
        assert!(verifier.verify("a").is_ok());
    }
}
