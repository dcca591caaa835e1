//! Language state: the active language, persisted across sessions

use std::sync::Arc;

use tracing::{Level, event};

use crate::{
    dom::Document,
    domain::{
        I18nError, LanguageCode,
        constant::{defaults, language_state}
    },
    port::storage::PreferenceStore
};

/// Holds the active language code and keeps the durable copy in sync.
///
/// `set_current` is the only mutation surface.
pub struct LanguageState {
    current: LanguageCode,
    store:   Arc<dyn PreferenceStore>
}

impl LanguageState {
    /// Restore the persisted language (or `default` when nothing is stored) and
    /// mirror it onto the document's root `lang` attribute.
    ///
    /// A store that cannot be read is treated as empty.
    pub async fn initialize(store: Arc<dyn PreferenceStore>, default: LanguageCode, document: &mut Document) -> Self {
        let current = match store.get(defaults::STORAGE_KEY).await {
            Ok(Some(code)) if !code.trim().is_empty() => LanguageCode::from(code.trim()),
            Ok(_) => default,
            Err(e) => {
                event!(Level::WARN, event = language_state::RESTORE_FAILED, error = %e, fallback = %default);
                default
            }
        };

        document.set_attribute(document.root(), "lang", current.as_str());
        event!(Level::DEBUG, event = language_state::STATE_INITIALIZED, language = %current);

        Self { current, store }
    }

    pub fn current(&self) -> &LanguageCode {
        &self.current
    }

    /// Switch to `lang`.
    ///
    /// Returns `Ok(false)` without touching storage or the document when `lang`
    /// is already active. The durable write happens first; if it fails nothing
    /// else changes.
    pub async fn set_current(&mut self, lang: &LanguageCode, document: &mut Document) -> Result<bool, I18nError> {
        if *lang == self.current {
            event!(Level::DEBUG, event = language_state::LANGUAGE_UNCHANGED, language = %lang);
            return Ok(false);
        }

        if let Err(e) = self.store.set(defaults::STORAGE_KEY, lang.as_str()).await {
            event!(Level::ERROR, event = language_state::PERSIST_FAILED, language = %lang, error = %e);
            return Err(e);
        }

        let previous = std::mem::replace(&mut self.current, lang.clone());
        document.set_attribute(document.root(), "lang", lang.as_str());
        event!(Level::INFO, event = language_state::LANGUAGE_CHANGED, from = %previous, to = %lang);

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::adapter::storage::InMemoryPreferenceStore;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    #[async_trait]
    impl PreferenceStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, I18nError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), I18nError> {
            Err(I18nError::Storage("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), I18nError> {
            Err(I18nError::Storage("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_initialize_defaults_to_fallback() {
        let mut document = Document::new();
        let state =
            LanguageState::initialize(Arc::new(InMemoryPreferenceStore::new()), LanguageCode::fallback(), &mut document)
                .await;

        assert_eq!(state.current(), &LanguageCode::from("en"));
        assert_eq!(document.attribute(document.root(), "lang"), Some("en"));
    }

    #[tokio::test]
    async fn test_initialize_reads_persisted_value() {
        let store = InMemoryPreferenceStore::new();
        store.set(defaults::STORAGE_KEY, "fr").await.unwrap();
        let mut document = Document::new();

        let state = LanguageState::initialize(Arc::new(store), LanguageCode::fallback(), &mut document).await;

        assert_eq!(state.current(), &LanguageCode::from("fr"));
        assert_eq!(document.attribute(document.root(), "lang"), Some("fr"));
    }

    #[tokio::test]
    async fn test_set_current_persists_and_updates_document() {
        let store = InMemoryPreferenceStore::new();
        let mut document = Document::new();
        let mut state = LanguageState::initialize(Arc::new(store.clone()), LanguageCode::fallback(), &mut document).await;

        let changed = state.set_current(&LanguageCode::from("fr"), &mut document).await.unwrap();

        assert!(changed);
        assert_eq!(state.current(), &LanguageCode::from("fr"));
        assert_eq!(store.get(defaults::STORAGE_KEY).await.unwrap(), Some("fr".to_string()));
        assert_eq!(document.attribute(document.root(), "lang"), Some("fr"));
    }

    #[tokio::test]
    async fn test_set_current_same_language_writes_nothing() {
        let store = InMemoryPreferenceStore::new();
        let mut document = Document::new();
        let mut state = LanguageState::initialize(Arc::new(store.clone()), LanguageCode::fallback(), &mut document).await;

        let changed = state.set_current(&LanguageCode::from("en"), &mut document).await.unwrap();

        assert!(!changed);
        assert_eq!(store.get(defaults::STORAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_state_untouched() {
        let mut document = Document::new();
        let mut state = LanguageState::initialize(Arc::new(ReadOnlyStore), LanguageCode::fallback(), &mut document).await;

        let result = state.set_current(&LanguageCode::from("fr"), &mut document).await;

        assert!(matches!(result, Err(I18nError::Storage(_))));
        assert_eq!(state.current(), &LanguageCode::from("en"));
        assert_eq!(document.attribute(document.root(), "lang"), Some("en"));
    }
}
