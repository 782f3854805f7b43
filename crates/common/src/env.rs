//! Environment/runtime helpers

use std::path::PathBuf;

/// Result of trying to load a `.env` file.
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    Missing,
    Failed(String),
}

/// Load `.env` if present so `RUST_LOG`, `DATABASE_URL` etc. take effect.
///
/// Called before logging is initialised, so the outcome is returned for the
/// caller to log once a subscriber exists.
pub fn load_dotenv() -> DotenvOutcome {
    match dotenvy::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(e) if e.not_found() => DotenvOutcome::Missing,
        Err(e) => DotenvOutcome::Failed(e.to_string()),
    }
}
