// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use spendbook::application::{CredentialHasher, Services};
use spendbook::domain::{ExpenseDraft, ExpenseId, UserId};
use spendbook::storage::{sqlite_url, Repository};
use sqlx::SqlitePool;
use tempfile::TempDir;

const TEST_DB: &str = "test.db";

/// Helper to create test services over a temporary database.
/// Uses a cheap hasher so registration stays fast.
pub async fn test_services() -> Result<(Services, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join(TEST_DB);
    let services = Services::init(db_path.to_str().unwrap())
        .await?
        .with_hasher(cheap_hasher());
    Ok((services, temp_dir))
}

pub fn cheap_hasher() -> CredentialHasher {
    CredentialHasher::new(1024, 1, 1).unwrap()
}

/// Register a user and return its id.
pub async fn register(services: &Services, email: &str) -> Result<UserId> {
    Ok(services.accounts.register(email, "pw123").await?)
}

/// Record an expense for an owner and return its id.
pub async fn add(
    services: &Services,
    owner: UserId,
    description: &str,
    amount: f64,
    category: &str,
    date: &str,
) -> Result<ExpenseId> {
    Ok(services
        .ledger
        .add_expense(ExpenseDraft::new(description, amount, category, date, owner))
        .await?)
}

fn test_db_url(temp_dir: &TempDir) -> String {
    sqlite_url(temp_dir.path().join(TEST_DB).to_str().unwrap())
}

/// Store a user row with an arbitrary password hash, bypassing registration.
pub async fn insert_raw_user(temp_dir: &TempDir, email: &str, hash: &str) -> Result<UserId> {
    let repo = Repository::init(&test_db_url(temp_dir)).await?;
    let user_id = repo.create_user(email, hash).await?;
    repo.close().await;
    Ok(user_id)
}

/// Store an expense row with a free-text date, bypassing validation.
pub async fn insert_raw_expense(
    temp_dir: &TempDir,
    owner: UserId,
    description: &str,
    date: &str,
) -> Result<()> {
    let pool = SqlitePool::connect(&test_db_url(temp_dir)).await?;
    sqlx::query(
        "INSERT INTO gastos (descricao, valor, categoria, data, usuario_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(description)
    .bind(1.0_f64)
    .bind("Legacy")
    .bind(date)
    .bind(owner)
    .execute(&pool)
    .await?;
    pool.close().await;
    Ok(())
}
