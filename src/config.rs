use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{
    adapter::storage::PreferenceStoreType,
    domain::{LanguageCode, constant::defaults},
    i18n::CatalogLoader
};

/// Configuration for the language switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Language used when no preference has been stored yet
    pub default_language: LanguageCode,
    /// Where the selected language is persisted
    pub storage:          PreferenceStoreType,
    /// Directory of `<code>.yaml|.yml|.json` tables; the built-in catalog is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_dir:      Option<PathBuf>,
    pub timing:           TimingSettings
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::fallback(),
            storage:          PreferenceStoreType::default(),
            catalog_dir:      None,
            timing:           TimingSettings::default()
        }
    }
}

impl Settings {
    pub fn catalog_loader(&self) -> CatalogLoader {
        match &self.catalog_dir {
            Some(dir) => CatalogLoader::new(dir),
            None => CatalogLoader::embedded()
        }
    }
}

/// Delays of the deferred page work, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub transition_delay_ms:     u64,
    pub notification_display_ms: u64,
    pub notification_exit_ms:    u64
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            transition_delay_ms:     defaults::TRANSITION_DELAY_MS,
            notification_display_ms: defaults::NOTIFICATION_DISPLAY_MS,
            notification_exit_ms:    defaults::NOTIFICATION_EXIT_MS
        }
    }
}

impl TimingSettings {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }
}

/// Get the project directories for cross-platform config path resolution
pub fn get_project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "numo").context("Failed to determine project directories")
}

pub fn get_config_dir() -> Result<PathBuf> {
    Ok(get_project_dirs()?.config_dir().to_path_buf())
}

/// Directory holding the file-backed preference store
pub fn get_data_dir() -> Result<PathBuf> {
    Ok(get_project_dirs()?.data_dir().to_path_buf())
}

pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load settings from the user config file, creating it with defaults if it doesn't exist
pub fn load_settings() -> Result<Settings> {
    let path = get_config_file_path()?;
    if path.exists() {
        load_settings_from(&path)
    } else {
        let settings = Settings::default();
        save_settings_to(&path, &settings)?;
        Ok(settings)
    }
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = serde_yaml::to_string(settings).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}
