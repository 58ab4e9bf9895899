pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Invalid answer for question {question_id}: {reason}")]
    InvalidAnswer { reason: String, question_id: String },

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Transient failures the caller may retry; everything else is a
    /// definitive answer about the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ServiceUnavailable)
    }

    pub fn invalid_answer(reason: impl Into<String>, question_id: impl Into<String>) -> Self {
        Error::InvalidAnswer {
            reason: reason.into(),
            question_id: question_id.into(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}
