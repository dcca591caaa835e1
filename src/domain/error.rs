use thiserror::Error;

/// Common error types for the language switching engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// No string table exists for the active language
    #[error("Translation not found for language: {language}")]
    CatalogMissingForLanguage { language: String },

    /// A tagged element references a key the active table does not define
    #[error("Translation missing for key: {key} in language: {language}")]
    KeyMissingInCatalog { key: String, language: String },

    /// Durable preference storage errors
    #[error("{0}")]
    Storage(String),

    /// File system related errors
    #[error("{0}")]
    FileSystem(String),

    /// Configuration related errors
    #[error("{0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("{0}")]
    Serialization(String),

    /// Document fixture errors
    #[error("{0}")]
    Document(String),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String)
}

impl I18nError {
    pub fn catalog_missing(language: impl Into<String>) -> Self {
        I18nError::CatalogMissingForLanguage { language: language.into() }
    }

    pub fn key_missing(key: impl Into<String>, language: impl Into<String>) -> Self {
        I18nError::KeyMissingInCatalog { key: key.into(), language: language.into() }
    }
}

/// Convert from anyhow::Error
impl From<anyhow::Error> for I18nError {
    fn from(err: anyhow::Error) -> Self {
        I18nError::Generic(err.to_string())
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for I18nError {
    fn from(err: std::io::Error) -> Self {
        I18nError::FileSystem(err.to_string())
    }
}

/// Convert from serde_yaml::Error
impl From<serde_yaml::Error> for I18nError {
    fn from(err: serde_yaml::Error) -> Self {
        I18nError::Serialization(err.to_string())
    }
}

/// Convert from serde_json::Error
impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        I18nError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_messages() {
        assert_eq!(I18nError::catalog_missing("de").to_string(), "Translation not found for language: de");
        assert_eq!(
            I18nError::key_missing("hero_title", "fr").to_string(),
            "Translation missing for key: hero_title in language: fr"
        );
    }

    #[test]
    fn test_io_error_maps_to_file_system() {
        let err: I18nError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, I18nError::FileSystem(message) if message == "gone"));
    }
}
