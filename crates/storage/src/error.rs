use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

impl StorageError {
    fn database_code(&self) -> Option<String> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.database_code().as_deref() == Some(UNIQUE_VIOLATION)
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.database_code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }

    pub fn is_check_violation(&self) -> bool {
        self.database_code().as_deref() == Some(CHECK_VIOLATION)
    }

    /// Turns integrity failures on writes into `ConstraintViolation` so the
    /// web layer can answer 409 instead of 500.
    pub fn classify_write(self, what: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(format!("{what} already exists"))
        } else if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(format!("{what} references a missing row"))
        } else if self.is_check_violation() {
            StorageError::ConstraintViolation(format!("{what} violates a check constraint"))
        } else {
            self
        }
    }
}
