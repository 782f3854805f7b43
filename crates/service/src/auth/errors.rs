use thiserror::Error;

pub const NO_TOKEN: &str = "Not authorized, no token";
pub const TOKEN_FAILED: &str = "Not authorized, token failed";

/// Token verification failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", NO_TOKEN)]
    MissingToken,
    #[error("{}", TOKEN_FAILED)]
    InvalidToken(String),
    #[error("token error: {0}")]
    Issue(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1004,
            AuthError::InvalidToken(_) => 1005,
            AuthError::Issue(_) => 1102,
        }
    }
}

impl From<AuthError> for crate::errors::ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Issue(msg) => crate::errors::ServiceError::Internal(msg),
            other => crate::errors::ServiceError::Unauthorized(other.to_string()),
        }
    }
}
