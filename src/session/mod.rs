//! Session gate: login/logout and the persisted "is authenticated" flag.
//!
//! The flag lives in a small JSON file. It survives restarts but does not
//! prove the server-side session is still alive; an expired session shows up
//! later as a transport error on whatever call hits it.

use std::path::{Path, PathBuf};

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::errors::ClientError;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Check the login form before anything is sent.
pub fn validate_login(name: &str, email: &str) -> Result<(), ClientError> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(ClientError::Validation(
            "Both fields are required.".to_string(),
        ));
    }
    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err(ClientError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

/// Text shown on the login form for a failed attempt.
pub fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Validation(msg) => msg.clone(),
        _ => LOGIN_FAILED_MESSAGE.to_string(),
    }
}

/// Contents of the session file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub is_authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
    pub updated_at: String,
}

/// File-backed storage for the session flag.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record; a missing file means no session.
    pub async fn load(&self) -> Result<Option<SessionRecord>, ClientError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, record: &SessionRecord) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(record)?).await?;
        Ok(())
    }

    /// Remove the record. Clearing an absent file is not an error.
    pub async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated { name: Option<String> },
}

/// Decides whether the login view or the search view is active.
pub struct SessionGate {
    store: SessionStore,
    state: SessionState,
}

impl SessionGate {
    /// Restore the gate from storage. An unreadable file counts as logged out.
    pub async fn open(store: SessionStore) -> Self {
        let state = match store.load().await {
            Ok(Some(record)) if record.is_authenticated => {
                tracing::info!("Restored session from {:?}", store.path());
                SessionState::Authenticated { name: record.name }
            }
            Ok(_) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {}", e);
                SessionState::Unauthenticated
            }
        };
        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Validate the form, log in, and persist the flag.
    ///
    /// The gate only flips to authenticated once the login call succeeded.
    pub async fn login(
        &mut self,
        client: &ApiClient,
        name: &str,
        email: &str,
    ) -> Result<(), ClientError> {
        validate_login(name, email)?;
        let name = name.trim();

        if let Err(e) = client.login(name, email.trim()).await {
            tracing::error!("Login failed: {}", e);
            return Err(e);
        }

        self.store
            .save(&SessionRecord {
                is_authenticated: true,
                name: Some(name.to_string()),
                updated_at: Utc::now().to_rfc3339(),
            })
            .await?;

        tracing::info!("Logged in as {}", name);
        self.state = SessionState::Authenticated {
            name: Some(name.to_string()),
        };
        Ok(())
    }

    /// Log out remotely (best effort) and clear the persisted flag.
    pub async fn logout(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        if let Err(e) = client.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.state = SessionState::Unauthenticated;
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("Ana", "ana@example.com").is_ok());
        assert_eq!(
            validate_login("", "ana@example.com"),
            Err(ClientError::Validation("Both fields are required.".into()))
        );
        assert_eq!(
            validate_login("Ana", "ana@example"),
            Err(ClientError::Validation(
                "Please enter a valid email address.".into()
            ))
        );
        assert!(validate_login("Ana", "a na@example.com").is_err());
        assert!(validate_login("Ana", "ana@@example.com").is_err());
    }

    #[test]
    fn test_login_error_message() {
        assert_eq!(
            login_error_message(&ClientError::Transport("503".into())),
            LOGIN_FAILED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_store_round_trip_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let record = SessionRecord {
            is_authenticated: true,
            name: Some("Ana".into()),
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        store.save(&record).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(record));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gate_restores_flag_and_ignores_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        tokio::fs::write(&path, br#"{"isAuthenticated":true,"updatedAt":"x"}"#)
            .await
            .unwrap();
        let gate = SessionGate::open(SessionStore::new(&path)).await;
        assert!(gate.is_authenticated());

        tokio::fs::write(&path, b"not json").await.unwrap();
        let gate = SessionGate::open(SessionStore::new(&path)).await;
        assert_eq!(*gate.state(), SessionState::Unauthenticated);
    }
}
