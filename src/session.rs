//! # Operator Session
//!
//! Demo-grade login: any non-empty username/password pair is accepted. The
//! logged-in user is the only state that outlives the process, stored as a
//! single JSON record through a [`SessionStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter valid credentials")]
    InvalidCredentials,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Stored session is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub username: String,
    pub login_time: DateTime<Utc>,
}

/// Persistence for the single login-state record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<UserSession>, SessionError>;
    async fn save(&self, session: &UserSession) -> Result<(), SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Keeps the record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<UserSession>, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &UserSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec(session)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<UserSession>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<UserSession>, SessionError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, session: &UserSession) -> Result<(), SessionError> {
        *self.slot.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot.write().await = None;
        Ok(())
    }
}

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: Option<UserSession>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Pick up a session persisted by an earlier run. An unreadable record
    /// is discarded rather than failing startup.
    pub async fn restore(&mut self) -> Result<Option<&UserSession>, SessionError> {
        match self.store.load().await {
            Ok(Some(session)) => {
                info!(username = %session.username, "session restored");
                self.current = Some(session);
            }
            Ok(None) => self.current = None,
            Err(SessionError::Corrupt(e)) => {
                warn!(error = %e, "discarding unreadable session record");
                self.store.clear().await?;
                self.current = None;
            }
            Err(e) => return Err(e),
        }
        Ok(self.current.as_ref())
    }

    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<&UserSession, SessionError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            warn!("login rejected: empty credentials");
            return Err(SessionError::InvalidCredentials);
        }

        let session = UserSession {
            username: username.to_string(),
            login_time: now,
        };
        self.store.save(&session).await?;
        info!(username = %session.username, "login successful");
        Ok(&*self.current.insert(session))
    }

    /// The in-memory session is only dropped once the stored record is gone.
    pub async fn logout(&mut self) -> Result<UserSession, SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NotLoggedIn);
        }
        self.store.clear().await?;
        let session = self.current.take().ok_or(SessionError::NotLoggedIn)?;
        info!(username = %session.username, "logged out");
        Ok(session)
    }
}
