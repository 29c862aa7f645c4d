use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::user::User;

/// On-disk session payload: the identity plus when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    pub saved_at: DateTime<Utc>,
}

/// File-backed persistence for the authenticated identity. No network.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config() -> Result<Self> {
        let config = crate::config::get_config();
        if let Some(path) = &config.session_file {
            return Ok(Self::new(path.clone()));
        }
        let dirs = ProjectDirs::from("", "", "jobhunter").ok_or_else(|| {
            Error::Config("Could not determine a data directory for the session file".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    /// A missing, unreadable, or malformed session file means "logged out";
    /// restore never fails.
    pub fn restore(&self) -> Option<User> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(session) => Some(session.user),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                None
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let session = StoredSession {
            user: user.clone(),
            saved_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
