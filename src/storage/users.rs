use anyhow::{Context, Result};
use sqlx::Row;

use crate::domain::{User, UserId};

use super::{DuplicateEmail, Repository};

impl Repository {
    // ========================
    // User operations
    // ========================

    /// Insert a new user and return its id.
    ///
    /// Fails with [`DuplicateEmail`] when the email is already taken.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserId> {
        let result = sqlx::query("INSERT INTO usuarios (email, senha) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DuplicateEmail(email.to_string()).into())
            }
            Err(err) => Err(err).context("Failed to create user"),
        }
    }

    /// Get a user by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, senha
            FROM usuarios
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.map(|row| Self::row_to_user(&row)))
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("senha"),
        }
    }
}
