//! Page translator: apply the active language's table to every tagged element

use serde::Serialize;
use tracing::{Level, event};

use super::{TranslationCatalog, applier};
use crate::{
    dom::{Document, NodeId},
    domain::{
        I18nError, LanguageCode,
        constant::{dom, page_translator}
    }
};

/// Outcome of one translation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub language:     String,
    /// Elements whose text was rewritten
    pub translated:   usize,
    /// Keys without an entry in the active table, once per occurrence, in document order
    pub missing_keys: Vec<String>
}

impl TranslationReport {
    pub fn is_complete(&self) -> bool {
        self.missing_keys.is_empty()
    }
}

/// Translate every tagged element of `document` into `lang`.
///
/// Fails with [`I18nError::CatalogMissingForLanguage`] before touching the
/// document when the catalog has no table for `lang`. A key missing from the
/// table, or mapped to an empty string, leaves its element unchanged and is
/// recorded in the report; the pass always continues with the remaining
/// elements.
pub fn translate_page(
    document: &mut Document,
    catalog: &TranslationCatalog,
    lang: &LanguageCode
) -> Result<TranslationReport, I18nError> {
    if !catalog.contains_language(lang) {
        event!(Level::ERROR, event = page_translator::CATALOG_MISSING, language = %lang);
        return Err(I18nError::catalog_missing(lang.as_str()));
    }

    // Snapshot first: rewrites below may detach elements found here.
    let tagged: Vec<(NodeId, String)> = document
        .elements_with_attribute(dom::CONTENT_KEY_ATTR)
        .into_iter()
        .filter_map(|id| document.attribute(id, dom::CONTENT_KEY_ATTR).map(|key| (id, key.to_string())))
        .collect();

    event!(Level::DEBUG, event = page_translator::PASS_STARTED, language = %lang, elements = tagged.len());

    let mut report = TranslationReport { language: lang.to_string(), ..Default::default() };
    for (element, key) in tagged {
        match catalog.lookup(lang, &key) {
            Some(text) => {
                applier::apply_translation(document, element, text);
                report.translated += 1;
            }
            None => {
                let missing = I18nError::key_missing(&key, lang.as_str());
                event!(Level::WARN, event = page_translator::KEY_MISSING, key = %key, language = %lang,
                       message = %missing);
                report.missing_keys.push(key);
            }
        }
    }

    event!(Level::DEBUG, event = page_translator::PASS_COMPLETED, language = %lang,
           translated = report.translated, missing = report.missing_keys.len());

    Ok(report)
}
