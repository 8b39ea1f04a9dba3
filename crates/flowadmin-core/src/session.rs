//! Persisted admin session: the bearer token and the cached profile.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Superadmin,
}

impl Role {
    /// Label shown next to the operator's name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Superadmin => "Super Admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub email: Option<String>,
}

impl AdminProfile {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Admin")
    }

    /// Uppercased first letter of the display name.
    #[must_use]
    pub fn avatar_initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map_or_else(|| "A".to_string(), |c| c.to_uppercase().collect())
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::Superadmin
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub profile: Option<AdminProfile>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[redacted]")
            .field("profile", &self.profile)
            .finish()
    }
}

/// A malformed cached profile is treated as absent rather than failing the
/// whole session read.
fn lenient_profile<'de, D>(deserializer: D) -> Result<Option<AdminProfile>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

/// JSON file holding the current [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the session file. A missing file means "not signed in".
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let session: Session =
            serde_json::from_str(&content).map_err(|e| SessionError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })?;
        Ok(Some(session).filter(|s| !s.token.trim().is_empty()))
    }

    /// Writes the session file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] on any filesystem failure.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(session).map_err(|e| SessionError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_error(e))
    }

    /// Replaces the cached profile, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the session cannot be read or written.
    /// Does nothing when there is no session.
    pub fn save_profile(&self, profile: &AdminProfile) -> Result<(), SessionError> {
        let Some(mut session) = self.load()? else {
            return Ok(());
        };
        session.profile = Some(profile.clone());
        self.save(&session)
    }

    /// Removes the token and the cached profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// `true` when the cached profile says `superadmin`. Any read problem
    /// counts as `false`.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.load()
            .ok()
            .flatten()
            .and_then(|s| s.profile)
            .is_some_and(|p| p.is_super_admin())
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
