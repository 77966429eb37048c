use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure a repository or validation call can report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("no fields provided for update")]
    NoFieldsProvided,
    #[error("referenced row does not exist: {0}")]
    ReferentialIntegrityViolation(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error("store error: {0}")]
    Store(#[source] sqlx::Error),
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// True for failures caused by the request itself rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_) | Self::Store(_))
    }
}

// Postgres SQLSTATE codes the repository distinguishes.
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const NOT_NULL_VIOLATION: &str = "23502";

/// Maps a Postgres SQLSTATE onto the taxonomy, if it is one we distinguish.
pub(crate) fn classify_sqlstate(code: &str, detail: String) -> Option<AppError> {
    match code {
        FOREIGN_KEY_VIOLATION => Some(AppError::ReferentialIntegrityViolation(detail)),
        UNIQUE_VIOLATION => Some(AppError::DuplicateKey(detail)),
        CHECK_VIOLATION | NOT_NULL_VIOLATION => Some(AppError::MalformedInput(detail)),
        // class 22: data exceptions (out of range, invalid datetime, ...)
        c if c.starts_with("22") => Some(AppError::MalformedInput(detail)),
        _ => None,
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let detail = match db_err.constraint() {
                    Some(constraint) => format!("{} ({})", db_err.message(), constraint),
                    None => db_err.message().to_string(),
                };
                let classified = db_err
                    .code()
                    .and_then(|code| classify_sqlstate(&code, detail));
                match classified {
                    Some(app_err) => app_err,
                    None => Self::Store(sqlx::Error::Database(db_err)),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::StoreUnavailable(err),
            other => Self::Store(other),
        }
    }
}
