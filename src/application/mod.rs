// Application layer - use cases and orchestration.
// Both services share one store handle; `Services` owns its lifecycle.

pub mod accounts;
pub mod error;
pub mod ledger;
pub mod password;

pub use accounts::*;
pub use error::*;
pub use ledger::*;
pub use password::*;

use crate::storage::{sqlite_url, Repository};

/// The account and ledger services wired to a single store handle.
#[derive(Clone)]
pub struct Services {
    pub accounts: AccountService,
    pub ledger: LedgerService,
    repo: Repository,
}

impl Services {
    /// Build both services over an already-initialised store.
    pub fn new(repo: Repository) -> Self {
        Self {
            accounts: AccountService::new(repo.clone()),
            ledger: LedgerService::new(repo.clone()),
            repo,
        }
    }

    /// Open (creating if needed) the database at the given path and make
    /// sure the schema exists before returning.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let repo = Repository::init(&sqlite_url(database_path)).await?;
        Ok(Self::new(repo))
    }

    /// Replace the password hasher used for registration.
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.accounts = self.accounts.with_hasher(hasher);
        self
    }

    /// Release the store handle. Call once at shutdown.
    pub async fn close(&self) {
        self.repo.close().await;
    }
}
