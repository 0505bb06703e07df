// src/keywords.rs
// Ordered keyword list persisted as a JSON array of strings. Read fully on
// load, rewritten fully on every mutation (write-temp-then-rename, so a
// reader never observes a half-written file).

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Seed set written on first run when no store file exists yet.
pub const DEFAULT_KEYWORDS: &[&str] = &["KT텔레캅", "에스원", "쉴더스", "보안 사고", "안전 사고"];

#[derive(Debug, Error)]
pub enum KeywordStoreError {
    #[error("keyword must not be empty")]
    Empty,
    #[error("keyword '{0}' already exists")]
    Duplicate(String),
    #[error("index {index} out of range (store holds {len} keywords)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("keyword store {} is corrupt", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("keyword store i/o failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct KeywordStore {
    path: PathBuf,
    keywords: Vec<String>,
}

impl KeywordStore {
    /// Load the store from `path`. A missing file is seeded with
    /// [`DEFAULT_KEYWORDS`] and persisted immediately; a corrupt file is a
    /// hard error (the operator must fix or delete it, guessing would
    /// silently change what the report searches for).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, KeywordStoreError> {
        let path = path.into();
        if !path.exists() {
            let store = Self {
                path,
                keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            };
            store.persist()?;
            info!(path = %store.path.display(), "seeded new keyword store");
            return Ok(store);
        }
        let raw = fs::read_to_string(&path)?;
        let keywords: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| KeywordStoreError::Corrupt {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, keywords })
    }

    pub fn list(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Append a keyword. Surrounding whitespace is trimmed before the
    /// duplicate check so " 에스원" and "에스원" are the same entry.
    pub fn add(&mut self, keyword: &str) -> Result<(), KeywordStoreError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(KeywordStoreError::Empty);
        }
        if self.keywords.iter().any(|k| k == keyword) {
            return Err(KeywordStoreError::Duplicate(keyword.to_string()));
        }
        self.keywords.push(keyword.to_string());
        self.persist()
    }

    /// Replace the keyword at `index`. Rewriting an entry with its own value
    /// is a no-op, but colliding with a *different* existing entry is
    /// rejected.
    pub fn update(&mut self, index: usize, new_value: &str) -> Result<(), KeywordStoreError> {
        let len = self.keywords.len();
        if index >= len {
            return Err(KeywordStoreError::IndexOutOfRange { index, len });
        }
        let new_value = new_value.trim();
        if new_value.is_empty() {
            return Err(KeywordStoreError::Empty);
        }
        if self
            .keywords
            .iter()
            .enumerate()
            .any(|(i, k)| i != index && k == new_value)
        {
            return Err(KeywordStoreError::Duplicate(new_value.to_string()));
        }
        self.keywords[index] = new_value.to_string();
        self.persist()
    }

    pub fn remove(&mut self, index: usize) -> Result<(), KeywordStoreError> {
        let len = self.keywords.len();
        if index >= len {
            return Err(KeywordStoreError::IndexOutOfRange { index, len });
        }
        self.keywords.remove(index);
        self.persist()
    }

    fn persist(&self) -> Result<(), KeywordStoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.keywords)
            .expect("a Vec<String> always serializes");
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(error = ?e, path = %self.path.display(), "keyword store rename failed");
            return Err(e.into());
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
