use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShajraError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Unauthorized - user not authenticated")]
    Unauthorized,

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ShajraError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShajraError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        ShajraError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

pub type ShajraResult<T> = Result<T, ShajraError>;
