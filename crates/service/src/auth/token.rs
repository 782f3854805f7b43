use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

use super::domain::{AuthUser, Claims};
use super::errors::AuthError;

/// HS256 token signing and verification with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `user_id` valid for `ttl`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::TokenService;
    /// let tokens = TokenService::new("secret");
    /// let id = uuid::Uuid::new_v4();
    /// let token = tokens.issue_token(id, chrono::Duration::hours(1)).unwrap();
    /// assert_eq!(tokens.verify_token(&token).unwrap().id, id);
    /// ```
    pub fn issue_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims { sub: user_id.to_string(), exp: (now + ttl).timestamp(), iat: Some(now.timestamp()) };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::Issue(e.to_string()))
    }

    /// Check signature and expiry and resolve the requester.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::InvalidToken(e.to_string())
        })?;
        let id = Uuid::parse_str(&data.claims.sub).map_err(|e| AuthError::InvalidToken(format!("sub: {e}")))?;
        Ok(AuthUser { id })
    }
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
