//! Shared plumbing for the data API crates: logging setup, `.env` loading
//! and small response types.

pub mod types;
pub mod utils;
pub mod env;
