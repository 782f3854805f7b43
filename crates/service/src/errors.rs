use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("{}", model_message(.0))]
    Model(#[from] models::errors::ModelError),
}

fn model_message(e: &models::errors::ModelError) -> String {
    match e {
        models::errors::ModelError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

impl ServiceError {
    pub fn not_found(msg: &str) -> Self { Self::NotFound(msg.to_string()) }

    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }

    /// Client-side errors: bad input, missing or foreign records, name clashes.
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::NotFound(_)
            | ServiceError::Conflict(_)
            | ServiceError::Unauthorized(_) => true,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => true,
            _ => false,
        }
    }
}
