use tracing::{info, warn};

use crate::domain::UserId;
use crate::storage::{DuplicateEmail, Repository};

use super::{AppError, CredentialHasher};

/// Registration and login against the credential store.
#[derive(Clone)]
pub struct AccountService {
    repo: Repository,
    hasher: CredentialHasher,
}

impl AccountService {
    /// Create an account service with the default hasher.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            hasher: CredentialHasher::default(),
        }
    }

    /// Replace the password hasher.
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Register a new user and return its id.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserId, AppError> {
        require_credentials(email, password)?;

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;

        match self.repo.create_user(email, &password_hash).await {
            Ok(user_id) => {
                info!(user_id, "user registered");
                Ok(user_id)
            }
            Err(err) if err.downcast_ref::<DuplicateEmail>().is_some() => {
                warn!("registration rejected: email already registered");
                Err(AppError::EmailTaken(email.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Check an email/password pair and return the user's id.
    ///
    /// Unknown email and wrong password produce the same
    /// [`AppError::InvalidCredentials`]. No session is created; the caller
    /// keeps the returned id.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, AppError> {
        require_credentials(email, password)?;

        let Some(user) = self.repo.find_user_by_email(email).await? else {
            warn!("login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash)
            .await?;

        if matches {
            info!(user_id = user.id, "user logged in");
            Ok(user.id)
        } else {
            warn!("login rejected");
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Blank (empty or whitespace-only) values count as missing, as they do for
/// expense text fields.
fn require_credentials(email: &str, password: &str) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if email.trim().is_empty() {
        missing.push("email");
    }
    if password.trim().is_empty() {
        missing.push("password");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::missing_fields(&missing))
    }
}
