//! Storage implementations for the language preference
//!
//! This module provides both in-memory and file-backed implementations
//! of the PreferenceStore trait.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::Arc
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::{domain::I18nError, port::storage::PreferenceStore};

const PREFERENCES_FILE: &str = "preferences.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum PreferenceStoreType {
    #[serde(rename = "inmemory")]
    #[value(name = "inmemory")]
    InMemory,
    #[default]
    #[serde(rename = "file")]
    #[value(name = "file")]
    File
}

impl PreferenceStoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceStoreType::InMemory => "inmemory",
            PreferenceStoreType::File => "file"
        }
    }
}

/// In-memory preference store
///
/// Values are lost when the process exits. Clones share the same entries, so a
/// clone handed to a fresh page simulates a reload within one session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    entries: Arc<RwLock<HashMap<String, String>>>
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, I18nError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), I18nError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), I18nError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

/// On-disk layout of the preferences file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    entries:    BTreeMap<String, String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>
}

/// File-based preference store keeping every entry in one YAML document
pub struct FilePreferenceStore {
    dir:        PathBuf,
    /// Serializes read-modify-write cycles on the preferences file
    write_lock: Mutex<()>
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    async fn read(&self) -> Result<StoredPreferences, I18nError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(StoredPreferences::default());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| I18nError::Storage(format!("Failed to read preferences file {}: {}", path.display(), e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| I18nError::Storage(format!("Failed to parse preferences file {}: {}", path.display(), e)))
    }

    async fn write(&self, mut preferences: StoredPreferences) -> Result<(), I18nError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| I18nError::Storage(format!("Failed to create preferences directory: {}", e)))?;

        preferences.updated_at = Some(Utc::now());
        let content = serde_yaml::to_string(&preferences)
            .map_err(|e| I18nError::Storage(format!("Failed to serialize preferences: {}", e)))?;

        tokio::fs::write(self.file_path(), content)
            .await
            .map_err(|e| I18nError::Storage(format!("Failed to write preferences file: {}", e)))
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, I18nError> {
        let preferences = self.read().await?;
        Ok(preferences.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), I18nError> {
        let _guard = self.write_lock.lock().await;
        let mut preferences = self.read().await?;
        preferences.entries.insert(key.to_string(), value.to_string());
        self.write(preferences).await
    }

    async fn remove(&self, key: &str) -> Result<(), I18nError> {
        let _guard = self.write_lock.lock().await;
        let mut preferences = self.read().await?;
        if preferences.entries.remove(key).is_none() {
            return Ok(());
        }
        self.write(preferences).await
    }
}

/// Preference store factory - configuration-driven store creation
pub struct PreferenceStoreFactory;

impl PreferenceStoreFactory {
    pub fn create(store_type: PreferenceStoreType, dir: impl Into<PathBuf>) -> Arc<dyn PreferenceStore> {
        match store_type {
            PreferenceStoreType::InMemory => Arc::new(InMemoryPreferenceStore::new()),
            PreferenceStoreType::File => Arc::new(FilePreferenceStore::new(dir))
        }
    }
}
