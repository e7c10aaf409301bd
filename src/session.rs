//! Persisted authentication session
//!
//! The session token is stored in ~/.vahan/session.json under the key
//! `token`. It is set on login or signup, cleared on logout, and read at
//! startup to pick the dashboard mode.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::UserProfile;
use crate::config::config_dir;

const SESSION_FILE: &str = "session.json";

pub const DEMO_TOKEN: &str = "demo-token-12345";
pub const DEMO_EMAIL: &str = "admin@vahanai.com";
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Issued locally for the demo account; never sent to the service.
    #[serde(default)]
    pub demo: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            token: token.into(),
            user,
            demo: false,
            created_at: Utc::now(),
        }
    }

    /// Synthetic session for the built-in demo account.
    pub fn demo() -> Self {
        Self {
            token: DEMO_TOKEN.to_string(),
            user: Some(UserProfile {
                username: "Demo User".to_string(),
                email: DEMO_EMAIL.to_string(),
                vehicle_number: Some("DEMO-2024".to_string()),
            }),
            demo: true,
            created_at: Utc::now(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("unknown user")
    }
}

/// File-backed session storage with explicit load/save/clear.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at ~/.vahan/session.json
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(config_dir()?.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let session: Session = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        if session.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Write the session with owner-only permissions (0600 on unix)
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(session).context("failed to serialize session")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("failed to create session file {}", self.path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("failed to write session to {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), demo = session.demo, "session saved");
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("failed to delete {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "session cleared");
        Ok(true)
    }
}
