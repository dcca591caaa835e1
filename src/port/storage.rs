use async_trait::async_trait;

use crate::domain::I18nError;

/// Port for durable key-value preference storage
///
/// Values survive across page loads and sessions. Only string values are
/// stored; callers own the encoding of anything richer.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, I18nError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), I18nError>;

    /// Delete the value stored under `key`
    async fn remove(&self, key: &str) -> Result<(), I18nError>;
}
