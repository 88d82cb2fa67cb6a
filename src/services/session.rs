use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::User,
    storage::{Persistence, StorageKey},
};

/// The single logged-in identity, if any. Persisted across restarts until logout.
pub struct SessionState {
    persistence: Persistence,
    current: RwLock<Option<User>>,
}

impl SessionState {
    /// Restores the session saved by a previous run
    pub async fn restore(persistence: Persistence) -> Self {
        let current: Option<User> = persistence.load(&StorageKey::CurrentUser, None).await;
        if let Some(user) = &current {
            tracing::info!(username = %user.username, "Restored session");
        }

        Self {
            persistence,
            current: RwLock::new(current),
        }
    }

    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Returns the logged-in user or an `Unauthorized` error for gated views
    pub async fn require_user(&self) -> AppResult<User> {
        self.current()
            .await
            .ok_or_else(|| AppError::Unauthorized("Please log in first.".to_string()))
    }

    /// Replaces any existing session with `user`
    pub(crate) async fn establish(&self, user: User) -> AppResult<()> {
        self.replace(Some(user)).await
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.replace(None).await
    }

    async fn replace(&self, user: Option<User>) -> AppResult<()> {
        let mut current = self.current.write().await;
        self.persistence.save(&StorageKey::CurrentUser, &user).await?;
        *current = user;
        Ok(())
    }
}
