use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

/// No usable token is stored. Callers treat this as terminal for the
/// operation in flight; it is never retried.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("No token found")]
pub struct MissingCredentialError;

/// Source of the bearer token attached to every API call.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Result<String, MissingCredentialError>;
}

/// Token kept in a single file, written by the login flow and re-read on
/// every call so an external refresh is picked up immediately.
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "carteira").map(|dirs| dirs.config_dir().join("token"))
    }
}

impl CredentialProvider for TokenFile {
    fn token(&self) -> Result<String, MissingCredentialError> {
        let raw = fs::read_to_string(&self.path).map_err(|_| MissingCredentialError)?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(MissingCredentialError);
        }
        Ok(token.to_string())
    }
}
