use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error::AppResult,
    models::Credentials,
    services::session::SessionState,
    storage::{Persistence, StorageKey},
};

/// Mock account directory
///
/// Credentials are stored and compared in plaintext. This is demo behaviour only and must not be
/// mistaken for authentication. Password policy is the caller's concern, see
/// [`crate::services::validation`].
///
/// Every operation holds `write_lock` from the directory load until its save or session change
/// completes.
pub struct AccountRegistry {
    persistence: Persistence,
    session: Arc<SessionState>,
    write_lock: Mutex<()>,
}

impl AccountRegistry {
    pub fn new(persistence: Persistence, session: Arc<SessionState>) -> Self {
        Self {
            persistence,
            session,
            write_lock: Mutex::new(()),
        }
    }

    async fn accounts(&self) -> Vec<Credentials> {
        self.persistence.load(&StorageKey::Accounts, Vec::new()).await
    }

    /// Registers a new account. Returns `false` when the username is taken.
    ///
    /// Does not log the new user in.
    pub async fn signup(&self, username: &str, password: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut accounts = self.accounts().await;

        if accounts.iter().any(|a| a.username == username) {
            tracing::warn!(username = %username, "Signup failed: username already exists");
            return Ok(false);
        }

        accounts.push(Credentials::new(username, password));
        self.persistence.save(&StorageKey::Accounts, &accounts).await?;

        tracing::info!(username = %username, "Signup successful");
        Ok(true)
    }

    /// Checks the credentials and, on an exact match, starts a session for that user
    pub async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let accounts = self.accounts().await;

        match accounts.iter().find(|a| a.matches(username, password)) {
            Some(account) => {
                self.session.establish(account.identity()).await?;
                tracing::info!(username = %username, "Login successful");
                Ok(true)
            }
            None => {
                tracing::warn!(username = %username, "Login failed: invalid credentials");
                Ok(false)
            }
        }
    }

    /// Removes the account for `username`, if any, then ends the current session regardless
    pub async fn delete_account(&self, username: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut accounts = self.accounts().await;
        let before = accounts.len();
        accounts.retain(|a| a.username != username);

        if accounts.len() != before {
            self.persistence.save(&StorageKey::Accounts, &accounts).await?;
            tracing::info!(username = %username, "Account deleted");
        } else {
            tracing::debug!(username = %username, "No account to delete");
        }

        self.session.logout().await
    }
}
