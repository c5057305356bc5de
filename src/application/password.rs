//! Salted one-way password hashing using Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
//! salt and cost parameters travel with the hash and verification needs
//! nothing but the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::warn;

use super::AppError;

/// Argon2id hasher with a fixed work factor.
///
/// The default uses the argon2 crate's recommended parameters
/// (19 MiB, 2 iterations, 1 lane), comparable in cost to bcrypt at cost 10.
#[derive(Debug, Clone, Default)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with explicit parameters.
    /// `memory_cost` is in KiB; `time_cost` is the iteration count.
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_cost, time_cost, parallelism, None)
            .map_err(|e| AppError::PasswordHash(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::PasswordHash(e.to_string()))
    }

    /// Check a password against a stored PHC string.
    ///
    /// A hash this hasher cannot read (not PHC, or an algorithm other than
    /// Argon2, such as a bcrypt `$2a$` hash) never matches.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored password hash is unreadable");
                return false;
            }
        };

        // Parameters are taken from the stored hash, not from `self`.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                warn!(
                    error = %e,
                    algorithm = %parsed.algorithm,
                    "stored password hash is unsupported"
                );
                false
            }
        }
    }

    /// [`CredentialHasher::hash`] on the blocking thread pool.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::PasswordHash(e.to_string()))?
    }

    /// [`CredentialHasher::verify`] on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        password: String,
        stored_hash: String,
    ) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AppError::PasswordHash(e.to_string()))
    }
}
