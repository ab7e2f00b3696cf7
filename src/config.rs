//! Configuration
//!
//! Read from ~/.config/mentionpad/config.json. Every field is optional; a
//! missing or unreadable file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::directory::{Directory, JsonFileDirectory, NoDirectory};
use crate::mention::{fallback_candidates, Candidate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file of candidates used as the directory
    pub directory: Option<PathBuf>,
    /// Replaces the built-in fallback list
    pub fallback: Option<Vec<Candidate>>,
    /// Where submitted notes are appended
    pub notes_path: Option<PathBuf>,
    /// Default tracing filter when MENTIONPAD_LOG is unset
    pub log_filter: Option<String>,
}

/// Get the path to the config file
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mentionpad")
        .join("config.json")
}

/// Directory for notes and the log file
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mentionpad")
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config");
                Self::default()
            }
        }
    }

    pub fn fallback_candidates(&self) -> Vec<Candidate> {
        match &self.fallback {
            Some(list) if !list.is_empty() => list.clone(),
            _ => fallback_candidates(),
        }
    }

    pub fn notes_path(&self) -> PathBuf {
        self.notes_path
            .clone()
            .unwrap_or_else(|| data_dir().join("notes.jsonl"))
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or("warn")
    }

    pub fn directory(&self) -> Arc<dyn Directory> {
        match &self.directory {
            Some(path) => Arc::new(JsonFileDirectory::new(path)),
            None => Arc::new(NoDirectory),
        }
    }
}
