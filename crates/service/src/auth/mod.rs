//! Bearer token verification.
//!
//! Tokens are issued by the user service; this crate only checks the HS256
//! signature and expiry and turns the `sub` claim into an [`AuthUser`].
//! `issue_token` exists for tooling and tests.

pub mod domain;
pub mod errors;
pub mod token;

pub use domain::{AuthUser, Claims};
pub use errors::AuthError;
pub use token::{bearer_token, TokenService};
