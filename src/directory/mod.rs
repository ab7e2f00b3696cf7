//! Candidate directory
//!
//! The directory is an external collaborator: it is asked for the full
//! candidate list once per session and may fail. The session falls back to
//! a static list when it does.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mention::Candidate;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read directory file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed directory file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of mentionable candidates
pub trait Directory: Send + Sync {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, DirectoryError>;
}

/// A fixed, in-memory directory
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    candidates: Vec<Candidate>,
}

impl StaticDirectory {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl Directory for StaticDirectory {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, DirectoryError> {
        Ok(self.candidates.clone())
    }
}

/// Directory backed by a JSON array of `{"id", "name"}` objects
#[derive(Debug, Clone)]
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Directory for JsonFileDirectory {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, DirectoryError> {
        let content = fs::read_to_string(&self.path).map_err(|source| DirectoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DirectoryError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Stands in when no directory is configured; always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl Directory for NoDirectory {
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, DirectoryError> {
        Err(DirectoryError::Unavailable("no directory configured".to_string()))
    }
}
