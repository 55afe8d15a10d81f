//! Authenticated-session detection.
//!
//! slidecap never drives the Google sign-in flow itself. Instead it reuses a
//! persistent Chrome profile that the user signs into once (headed, by hand);
//! every later run points Chrome at that profile so the auth cookies come
//! along for free. This module only answers "does such a profile exist yet".

use std::path::{Path, PathBuf};

/// Environment variable overriding the slidecap data directory
pub const DATA_DIR_ENV: &str = "SLIDECAP_DATA_DIR";

/// Resolve the slidecap data directory (`$SLIDECAP_DATA_DIR` or `~/.slidecap`)
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".slidecap")
}

/// Handle on the persistent browser profile used for authentication
#[derive(Debug, Clone)]
pub struct AuthSession {
    profile_dir: PathBuf,
}

impl AuthSession {
    /// Use the default profile location under the slidecap data directory
    pub fn new() -> Self {
        Self { profile_dir: data_dir().join("profile") }
    }

    /// Use an explicit profile directory
    pub fn with_profile_dir(dir: impl Into<PathBuf>) -> Self {
        Self { profile_dir: dir.into() }
    }

    /// The profile directory to hand to the browser launch options
    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// Whether a signed-in profile exists.
    ///
    /// Chrome writes its cookie store under `<profile>/Default/Cookies` once
    /// a session has been established; its presence is the pre-flight check
    /// that gates every run before any browser is launched.
    pub fn is_authenticated(&self) -> bool {
        self.profile_dir.join("Default").join("Cookies").is_file()
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_when_profile_missing() {
        let dir = tempfile::tempdir().unwrap();
        let auth = AuthSession::with_profile_dir(dir.path().join("profile"));

        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_authenticated_when_cookie_store_present() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile");
        std::fs::create_dir_all(profile.join("Default")).unwrap();
        std::fs::write(profile.join("Default").join("Cookies"), b"").unwrap();

        let auth = AuthSession::with_profile_dir(&profile);
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_profile_dir_exposed() {
        let auth = AuthSession::with_profile_dir("/tmp/p");
        assert_eq!(auth.profile_dir(), Path::new("/tmp/p"));
    }
}
