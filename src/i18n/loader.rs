use std::{
    collections::HashMap,
    path::{Path, PathBuf}
};

use once_cell::sync::Lazy;
use serde_yaml::Value;
use tracing::{Level, event};

use super::{TextMap, TranslationCatalog};
use crate::domain::{I18nError, LanguageCode, constant::catalog};

const EMBEDDED_TABLES: &[(&str, &str)] =
    &[("en", include_str!("../../config/i18n/en.yaml")), ("fr", include_str!("../../config/i18n/fr.yaml"))];

static EMBEDDED_CATALOG: Lazy<TranslationCatalog> = Lazy::new(|| {
    let tables = EMBEDDED_TABLES
        .iter()
        .filter_map(|(code, content)| match parse_yaml_table(content) {
            Ok(table) => Some((LanguageCode::from(*code), table)),
            Err(e) => {
                event!(Level::WARN, event = catalog::FILE_SKIPPED, language = %code, error = %e,
                       message = "embedded_table_unreadable");
                None
            }
        })
        .collect();
    TranslationCatalog::new(tables)
});

/// Catalogs compiled into the crate
pub fn embedded_catalog() -> &'static TranslationCatalog {
    &EMBEDDED_CATALOG
}

/// Loads string tables from `<dir>/<code>.yaml|.yml|.json`, falling back to the embedded catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    location: Option<PathBuf>
}

impl CatalogLoader {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self { location: Some(location.into()) }
    }

    pub fn embedded() -> Self {
        Self { location: None }
    }

    /// Load every readable table; unreadable files are skipped with a warning
    pub fn load(&self) -> TranslationCatalog {
        let Some(dir) = &self.location else {
            return embedded_catalog().clone();
        };

        match load_dir(dir) {
            Ok(tables) if !tables.is_empty() => {
                event!(Level::DEBUG, event = catalog::CATALOG_LOADED, dir = %dir.display(), languages = tables.len());
                TranslationCatalog::new(tables)
            }
            Ok(_) => {
                event!(Level::WARN, event = catalog::EMBEDDED_FALLBACK, dir = %dir.display(),
                       message = "no_tables_found");
                embedded_catalog().clone()
            }
            Err(e) => {
                event!(Level::WARN, event = catalog::EMBEDDED_FALLBACK, dir = %dir.display(), error = %e);
                embedded_catalog().clone()
            }
        }
    }
}

fn load_dir(dir: &Path) -> Result<HashMap<LanguageCode, TextMap>, I18nError> {
    let mut tables = HashMap::new();

    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let (Some(stem), Some(extension)) =
            (path.file_stem().and_then(|s| s.to_str()), path.extension().and_then(|e| e.to_str()))
        else {
            continue;
        };

        let parsed = match extension {
            "yaml" | "yml" => std::fs::read_to_string(&path).map_err(I18nError::from).and_then(|c| parse_yaml_table(&c)),
            "json" => std::fs::read_to_string(&path).map_err(I18nError::from).and_then(|c| parse_json_table(&c)),
            _ => continue
        };

        match parsed {
            Ok(table) => {
                tables.insert(LanguageCode::from(stem), table);
            }
            Err(e) => {
                event!(Level::WARN, event = catalog::FILE_SKIPPED, path = %path.display(), error = %e);
            }
        }
    }

    Ok(tables)
}

/// Parse a flat YAML key/value table, keeping only string values
pub fn parse_yaml_table(content: &str) -> Result<TextMap, I18nError> {
    let yaml_map = serde_yaml::from_str::<HashMap<String, Value>>(content)?;
    Ok(yaml_map.into_iter().filter_map(|(k, v)| if let Value::String(s) = v { Some((k, s)) } else { None }).collect())
}

/// Parse a flat JSON key/value table, keeping only string values
pub fn parse_json_table(content: &str) -> Result<TextMap, I18nError> {
    let json_map = serde_json::from_str::<HashMap<String, serde_json::Value>>(content)?;
    Ok(json_map
        .into_iter()
        .filter_map(|(k, v)| if let serde_json::Value::String(s) = v { Some((k, s)) } else { None })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_has_english_and_french() {
        let catalog = embedded_catalog();
        assert_eq!(catalog.languages(), vec![LanguageCode::from("en"), LanguageCode::from("fr")]);
        assert_eq!(catalog.lookup(&LanguageCode::from("fr"), "nav_home"), Some("Accueil"));
    }

    #[test]
    fn test_embedded_tables_cover_the_same_keys() {
        assert!(embedded_catalog().coverage_gaps().is_empty());
    }

    #[test]
    fn test_non_string_values_are_skipped() {
        let table = parse_yaml_table("title: Hello\ncount: 3\nnested:\n  a: b\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("title").map(String::as_str), Some("Hello"));
    }

    #[test]
    fn test_load_directory_with_mixed_formats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.yaml"), "greet: Hello\n").unwrap();
        std::fs::write(dir.path().join("fr.json"), r#"{"greet": "Bonjour"}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("de.yaml"), "greet: [unclosed").unwrap();

        let catalog = CatalogLoader::new(dir.path()).load();

        assert_eq!(catalog.languages(), vec![LanguageCode::from("en"), LanguageCode::from("fr")]);
        assert_eq!(catalog.lookup(&LanguageCode::from("fr"), "greet"), Some("Bonjour"));
    }

    #[test]
    fn test_missing_directory_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogLoader::new(dir.path().join("absent")).load();
        assert_eq!(&catalog, embedded_catalog());
    }
}
