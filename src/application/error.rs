use thiserror::Error;

/// Message shared by every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0:#}")]
    Database(#[from] anyhow::Error),
}

/// Coarse classification used by adapters to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing or malformed
    Validation,
    /// A unique key is already taken
    Conflict,
    /// Credentials did not match
    Auth,
    /// Storage or other internal failure
    Store,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::EmailTaken(_) => ErrorKind::Conflict,
            AppError::InvalidCredentials => ErrorKind::Auth,
            AppError::PasswordHash(_) | AppError::Database(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn missing_fields(fields: &[&str]) -> Self {
        AppError::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            AppError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::EmailTaken("a@x.com".into()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(AppError::InvalidCredentials.kind(), ErrorKind::Auth);
        assert_eq!(AppError::InvalidCredentials.to_string(), INVALID_CREDENTIALS);
        assert_eq!(
            AppError::Database(anyhow::anyhow!("disk full")).kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = AppError::missing_fields(&["email", "password"]);
        assert_eq!(
            err.to_string(),
            "Invalid input: Missing required fields: email, password"
        );
    }
}
