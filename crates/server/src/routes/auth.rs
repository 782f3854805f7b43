use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use service::auth::{bearer_token, AuthError, AuthUser, TokenService};
use service::errors::ServiceError;
use service::restaurant::RestaurantService;

use crate::errors::JsonApiError;

/// Cookie consulted when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub tokens: Arc<TokenService>,
}

impl ServerAuthConfig {
    pub fn new(jwt_secret: &str) -> Self {
        Self { tokens: Arc::new(TokenService::new(jwt_secret)) }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub restaurants: Arc<RestaurantService>,
    pub auth: ServerAuthConfig,
}

/// Extractor for routes that need a logged-in requester.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub AuthUser);

fn token_from_parts(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned);
    header.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    ServerState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = ServerState::from_ref(state);
        let token = token_from_parts(parts).ok_or_else(|| {
            debug!(path = %parts.uri.path(), code = AuthError::MissingToken.code(), "no token");
            ServiceError::from(AuthError::MissingToken)
        })?;
        let user = state.auth.tokens.verify_token(&token).map_err(|e| {
            debug!(path = %parts.uri.path(), code = e.code(), "rejected token");
            ServiceError::from(e)
        })?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_wins_over_cookie() {
        let p = parts(
            Request::builder()
                .header("authorization", "Bearer from-header")
                .header("cookie", "auth_token=from-cookie"),
        );
        assert_eq!(token_from_parts(&p).as_deref(), Some("from-header"));
    }

    #[test]
    fn cookie_is_the_fallback() {
        let p = parts(Request::builder().header("cookie", "theme=dark; auth_token=from-cookie"));
        assert_eq!(token_from_parts(&p).as_deref(), Some("from-cookie"));
        let p = parts(Request::builder().header("authorization", "Basic abc").header("cookie", "auth_token=c"));
        assert_eq!(token_from_parts(&p).as_deref(), Some("c"));
    }

    #[test]
    fn nothing_to_read() {
        assert!(token_from_parts(&parts(Request::builder())).is_none());
        assert!(token_from_parts(&parts(Request::builder().header("cookie", "auth_token="))).is_none());
    }
}
