//! Profile storage backends.
//!
//! The engine treats storage as a key/value document store: each record is
//! loaded and saved whole. Faults are reported as [`ProfileError`] and the
//! caller decides whether to fall back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::profile::{Config, HighScores, Profile};

pub const CONFIG_FILE: &str = "game_config.json";
pub const HIGH_SCORE_FILE: &str = "high_scores.json";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {record}: {source}")]
    Serialize {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Backend holding the persisted config and high-score records.
pub trait ProfileStore {
    fn load_config(&mut self) -> Result<Config, ProfileError>;
    fn save_config(&mut self, config: &Config) -> Result<(), ProfileError>;
    fn load_high_scores(&mut self) -> Result<HighScores, ProfileError>;
    fn save_high_scores(&mut self, scores: &HighScores) -> Result<(), ProfileError>;
}

/// Load both records, substituting defaults for any record that fails.
pub fn load_profile(store: &mut dyn ProfileStore) -> Profile {
    let config = store.load_config().unwrap_or_else(|e| {
        warn!("using default config: {e}");
        Config::default()
    });
    let high_scores = store.load_high_scores().unwrap_or_else(|e| {
        warn!("using default high scores: {e}");
        HighScores::default()
    });
    Profile {
        config,
        high_scores,
    }
}

/// Pretty-printed JSON files in a directory.
///
/// A missing file is created with defaults on first load.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_or_create<T>(&self, file: &str, record: &'static str) -> Result<T, ProfileError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let path = self.dir.join(file);
        if !path.exists() {
            let value = T::default();
            self.write(file, record, &value)?;
            info!("created {}", path.display());
            return Ok(value);
        }
        let json = fs::read_to_string(&path).map_err(|source| ProfileError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ProfileError::Parse { path, source })
    }

    fn write<T: Serialize>(&self, file: &str, record: &'static str, value: &T) -> Result<(), ProfileError> {
        fs::create_dir_all(&self.dir).map_err(|source| ProfileError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| ProfileError::Serialize { record, source })?;
        let path = self.dir.join(file);
        fs::write(&path, json).map_err(|source| ProfileError::Io { path, source })
    }
}

impl ProfileStore for JsonProfileStore {
    fn load_config(&mut self) -> Result<Config, ProfileError> {
        self.load_or_create(CONFIG_FILE, "config")
    }

    fn save_config(&mut self, config: &Config) -> Result<(), ProfileError> {
        self.write(CONFIG_FILE, "config", config)
    }

    fn load_high_scores(&mut self) -> Result<HighScores, ProfileError> {
        self.load_or_create(HIGH_SCORE_FILE, "high scores")
    }

    fn save_high_scores(&mut self, scores: &HighScores) -> Result<(), ProfileError> {
        self.write(HIGH_SCORE_FILE, "high scores", scores)
    }
}

/// In-memory store holding serialized documents, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    config: Option<String>,
    high_scores: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw documents, as if read from disk.
    pub fn with_documents(config: Option<&str>, high_scores: Option<&str>) -> Self {
        Self {
            config: config.map(str::to_string),
            high_scores: high_scores.map(str::to_string),
        }
    }

    pub fn config_document(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn high_scores_document(&self) -> Option<&str> {
        self.high_scores.as_deref()
    }

    fn parse<T: DeserializeOwned + Default>(doc: &Option<String>, name: &str) -> Result<T, ProfileError> {
        match doc {
            Some(json) => serde_json::from_str(json).map_err(|source| ProfileError::Parse {
                path: PathBuf::from(name),
                source,
            }),
            None => Ok(T::default()),
        }
    }

    fn encode<T: Serialize>(value: &T, record: &'static str) -> Result<String, ProfileError> {
        serde_json::to_string(value).map_err(|source| ProfileError::Serialize { record, source })
    }
}

impl ProfileStore for MemoryStore {
    fn load_config(&mut self) -> Result<Config, ProfileError> {
        Self::parse(&self.config, CONFIG_FILE)
    }

    fn save_config(&mut self, config: &Config) -> Result<(), ProfileError> {
        self.config = Some(Self::encode(config, "config")?);
        Ok(())
    }

    fn load_high_scores(&mut self) -> Result<HighScores, ProfileError> {
        Self::parse(&self.high_scores, HIGH_SCORE_FILE)
    }

    fn save_high_scores(&mut self, scores: &HighScores) -> Result<(), ProfileError> {
        self.high_scores = Some(Self::encode(scores, "high scores")?);
        Ok(())
    }
}
