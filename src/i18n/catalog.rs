//! Translation catalog: per-language string tables

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tabled::Tabled;

use crate::domain::LanguageCode;

/// Text mapping type: content key to localized string
pub type TextMap = HashMap<String, String>;

/// One line of the coverage overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct CoverageRow {
    #[tabled(rename = "Language")]
    pub language: String,
    #[tabled(rename = "Keys")]
    pub keys:     usize,
    #[tabled(rename = "Missing")]
    pub missing:  String
}

/// Read-only mapping `LanguageCode -> (ContentKey -> LocalizedString)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    tables: HashMap<LanguageCode, TextMap>
}

impl TranslationCatalog {
    pub fn new(tables: HashMap<LanguageCode, TextMap>) -> Self {
        Self { tables }
    }

    /// Build a catalog from string literal pairs
    pub fn from_pairs<'a>(tables: impl IntoIterator<Item = (&'a str, Vec<(&'a str, &'a str)>)>) -> Self {
        let tables = tables
            .into_iter()
            .map(|(lang, entries)| {
                let map = entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
                (LanguageCode::from(lang), map)
            })
            .collect();
        Self { tables }
    }

    /// The string table of a language, if the catalog has one
    pub fn table(&self, lang: &LanguageCode) -> Option<&TextMap> {
        self.tables.get(lang)
    }

    /// Localized string for `key` in `lang`; absent is not an error.
    ///
    /// An empty string counts as absent.
    pub fn lookup(&self, lang: &LanguageCode, key: &str) -> Option<&str> {
        self.table(lang).and_then(|table| table.get(key)).map(String::as_str).filter(|text| !text.is_empty())
    }

    pub fn contains_language(&self, lang: &LanguageCode) -> bool {
        self.tables.contains_key(lang)
    }

    /// Supported language codes, sorted
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut languages: Vec<LanguageCode> = self.tables.keys().cloned().collect();
        languages.sort();
        languages
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Per-language list of keys defined by some other language but missing here.
    /// Languages with full coverage are omitted.
    pub fn coverage_gaps(&self) -> BTreeMap<LanguageCode, Vec<String>> {
        let all_keys: BTreeSet<&str> = self.tables.values().flat_map(|table| table.keys().map(String::as_str)).collect();

        self.tables
            .iter()
            .filter_map(|(lang, table)| {
                let missing: Vec<String> =
                    all_keys.iter().filter(|key| !table.contains_key(**key)).map(|key| key.to_string()).collect();
                (!missing.is_empty()).then(|| (lang.clone(), missing))
            })
            .collect()
    }

    /// Coverage overview for every language, sorted by code
    pub fn coverage_rows(&self) -> Vec<CoverageRow> {
        let gaps = self.coverage_gaps();
        self.languages()
            .into_iter()
            .map(|lang| CoverageRow {
                keys:     self.tables.get(&lang).map_or(0, HashMap::len),
                missing:  gaps.get(&lang).map(|keys| keys.join(", ")).unwrap_or_default(),
                language: lang.to_string()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TranslationCatalog {
        TranslationCatalog::from_pairs([
            ("en", vec![("greet", "Hello"), ("bye", "Goodbye")]),
            ("fr", vec![("greet", "Bonjour")])
        ])
    }

    #[test]
    fn test_lookup_present_and_absent() {
        let catalog = catalog();
        let fr = LanguageCode::from("fr");

        assert_eq!(catalog.lookup(&fr, "greet"), Some("Bonjour"));
        assert_eq!(catalog.lookup(&fr, "bye"), None);
        assert_eq!(catalog.lookup(&LanguageCode::from("de"), "greet"), None);
    }

    #[test]
    fn test_languages_sorted() {
        assert_eq!(catalog().languages(), vec![LanguageCode::from("en"), LanguageCode::from("fr")]);
    }

    #[test]
    fn test_coverage_gaps_reports_missing_keys() {
        let gaps = catalog().coverage_gaps();

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps.get(&LanguageCode::from("fr")), Some(&vec!["bye".to_string()]));
    }

    #[test]
    fn test_coverage_rows_list_every_language() {
        let rows = catalog().coverage_rows();

        assert_eq!(
            rows,
            vec![
                CoverageRow { language: "en".to_string(), keys: 2, missing: String::new() },
                CoverageRow { language: "fr".to_string(), keys: 1, missing: "bye".to_string() }
            ]
        );
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let catalog = TranslationCatalog::from_pairs([("en", vec![("blank", "")])]);

        assert_eq!(catalog.lookup(&LanguageCode::from("en"), "blank"), None);
    }
}
