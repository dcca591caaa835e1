//! Language code type

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::constant::defaults;

/// Opaque short language identifier such as `en` or `fr`.
///
/// Codes are not checked against a catalog when constructed: an unknown code
/// can be selected and simply fails to translate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The hard-coded fallback used when nothing is persisted
    pub fn fallback() -> Self {
        Self::new(defaults::FALLBACK_LANGUAGE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label shown by the language indicator
    pub fn indicator_label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(LanguageCode::fallback(), "en");
        assert_eq!(LanguageCode::default(), LanguageCode::fallback());
    }

    #[test]
    fn test_indicator_label_uppercases() {
        assert_eq!(LanguageCode::from("fr").indicator_label(), "FR");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&LanguageCode::from("fr")).unwrap();
        assert_eq!(json, "\"fr\"");
    }
}
