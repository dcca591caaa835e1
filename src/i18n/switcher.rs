//! Switcher controller: language changes, the indicator and the dropdown

use tracing::{Level, event};

use super::{LanguageState, TranslationCatalog, TranslationReport, translate_page};
use crate::{
    dom::{Document, NodeId},
    domain::{
        I18nError, LanguageCode,
        constant::{dom, switcher}
    }
};

const DIMMED_OPACITY: &str = "0.7";
const FULL_OPACITY: &str = "1";

/// What a click did to the switcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Language carried by the clicked option, if any
    pub selected:      Option<LanguageCode>,
    /// New open state of the dropdown when the click changed it
    pub dropdown_open: Option<bool>
}

/// Owns the language state and drives the page-level switching steps.
///
/// The translation pass that follows a change is deferred by the caller;
/// [`SwitcherController::finish_transition`] is that deferred step.
pub struct SwitcherController {
    state: LanguageState
}

impl SwitcherController {
    pub fn new(state: LanguageState) -> Self {
        Self { state }
    }

    pub fn current(&self) -> &LanguageCode {
        self.state.current()
    }

    /// Page load: show the indicator and translate right away
    pub fn mount(&self, document: &mut Document, catalog: &TranslationCatalog) -> Result<TranslationReport, I18nError> {
        update_indicator(document, self.current());
        let report = translate_page(document, catalog, self.current());
        event!(Level::INFO, event = switcher::PAGE_MOUNTED, language = %self.current(), ok = report.is_ok());
        report
    }

    /// Switch to `lang` and prepare the page for the deferred translation pass.
    ///
    /// Returns `Ok(false)` and leaves the page alone when `lang` is already
    /// active. On success the indicator shows the new code, the body is dimmed
    /// and the dropdown is closed.
    pub async fn change_language(&mut self, lang: &LanguageCode, document: &mut Document) -> Result<bool, I18nError> {
        event!(Level::DEBUG, event = switcher::CHANGE_REQUESTED, from = %self.current(), to = %lang);

        if !self.state.set_current(lang, document).await? {
            return Ok(false);
        }

        update_indicator(document, lang);
        document.set_style_property(document.body(), "opacity", DIMMED_OPACITY);
        close_dropdown(document);

        Ok(true)
    }

    /// Deferred half of a change: translate into whatever language is active now and undim the body
    pub fn finish_transition(
        &self,
        document: &mut Document,
        catalog: &TranslationCatalog
    ) -> Result<TranslationReport, I18nError> {
        let report = translate_page(document, catalog, self.current());
        document.set_style_property(document.body(), "opacity", FULL_OPACITY);
        report
    }

    /// Route a click on `target` through the option, toggle and outside-click rules.
    ///
    /// Language selection is reported, not performed; the caller runs
    /// [`SwitcherController::change_language`] for it.
    pub fn resolve_click(&self, document: &mut Document, target: NodeId) -> ClickOutcome {
        if !document.has_node(target) {
            return ClickOutcome::default();
        }

        let selected = document
            .closest_with_attribute(target, dom::LANGUAGE_OPTION_ATTR)
            .and_then(|option| document.attribute(option, dom::LANGUAGE_OPTION_ATTR))
            .map(LanguageCode::from);

        let (Some(button), Some(dropdown)) =
            (document.get_element_by_id(dom::LANG_BUTTON_ID), document.get_element_by_id(dom::LANG_DROPDOWN_ID))
        else {
            return ClickOutcome { selected, dropdown_open: None };
        };

        let dropdown_open = if document.contains(button, target) {
            let open = document.toggle_class(dropdown, dom::ACTIVE_CLASS);
            event!(Level::DEBUG, event = switcher::DROPDOWN_TOGGLED, open);
            Some(open)
        } else if !document.contains(dropdown, target) && document.has_class(dropdown, dom::ACTIVE_CLASS) {
            document.remove_class(dropdown, dom::ACTIVE_CLASS);
            event!(Level::DEBUG, event = switcher::DROPDOWN_DISMISSED);
            Some(false)
        } else {
            None
        };

        ClickOutcome { selected, dropdown_open }
    }
}

/// Show `lang`'s uppercase code in the switcher button
pub fn update_indicator(document: &mut Document, lang: &LanguageCode) {
    if let Some(label) = document.get_element_by_id(dom::CURRENT_LANG_TEXT_ID) {
        document.set_text_content(label, &lang.indicator_label());
        return;
    }

    let Some(button) = document.get_element_by_id(dom::LANG_BUTTON_ID) else {
        return;
    };
    let first_text = document.children(button).iter().copied().find(|child| document.is_text(*child));
    if let Some(text) = first_text {
        document.set_text(text, &format!("{} ", lang.indicator_label()));
    }
}

/// Remove the open marker from the dropdown; returns whether it was open
pub fn close_dropdown(document: &mut Document) -> bool {
    let Some(dropdown) = document.get_element_by_id(dom::LANG_DROPDOWN_ID) else {
        return false;
    };
    let was_open = document.has_class(dropdown, dom::ACTIVE_CLASS);
    document.remove_class(dropdown, dom::ACTIVE_CLASS);
    was_open
}

pub fn is_dropdown_open(document: &Document) -> bool {
    document
        .get_element_by_id(dom::LANG_DROPDOWN_ID)
        .is_some_and(|dropdown| document.has_class(dropdown, dom::ACTIVE_CLASS))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{adapter::storage::InMemoryPreferenceStore, dom::PageSpec};

    const PAGE: &str = r#"
body:
  - tag: nav
    children:
      - tag: button
        attrs: { id: langButton }
        children:
          - tag: span
            attrs: { id: currentLangText }
            children: [ { text: EN } ]
          - tag: svg
      - tag: div
        attrs: { id: langDropdown }
        children:
          - tag: a
            attrs: { data-lang: en }
            children: [ { text: English } ]
          - tag: a
            attrs: { data-lang: fr }
            children: [ { tag: span, children: [ { text: Français } ] } ]
  - tag: h1
    attrs: { data-i18n: greet }
    children: [ { text: Hello } ]
  - tag: footer
    children: [ { text: footer } ]
"#;

    fn catalog() -> TranslationCatalog {
        TranslationCatalog::from_pairs([("en", vec![("greet", "Hello")]), ("fr", vec![("greet", "Bonjour")])])
    }

    async fn controller(document: &mut Document) -> SwitcherController {
        let state =
            LanguageState::initialize(Arc::new(InMemoryPreferenceStore::new()), LanguageCode::fallback(), document).await;
        SwitcherController::new(state)
    }

    fn by_id(document: &Document, id: &str) -> NodeId {
        document.get_element_by_id(id).unwrap()
    }

    fn option(document: &Document, code: &str) -> NodeId {
        document
            .elements_with_attribute("data-lang")
            .into_iter()
            .find(|node| document.attribute(*node, "data-lang") == Some(code))
            .unwrap()
    }

    #[tokio::test]
    async fn test_change_dims_closes_and_updates_indicator() {
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let mut switcher = controller(&mut document).await;
        document.add_class(by_id(&document, "langDropdown"), "active");

        let changed = switcher.change_language(&LanguageCode::from("fr"), &mut document).await.unwrap();

        assert!(changed);
        assert_eq!(document.text_content(by_id(&document, "currentLangText")), "FR");
        assert_eq!(document.style_property(document.body(), "opacity").as_deref(), Some("0.7"));
        assert!(!is_dropdown_open(&document));
        // translation is deferred
        assert_eq!(document.text_content(document.elements_with_attribute("data-i18n")[0]), "Hello");

        switcher.finish_transition(&mut document, &catalog()).unwrap();

        assert_eq!(document.text_content(document.elements_with_attribute("data-i18n")[0]), "Bonjour");
        assert_eq!(document.style_property(document.body(), "opacity").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_change_to_current_language_touches_nothing() {
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let mut switcher = controller(&mut document).await;
        document.add_class(by_id(&document, "langDropdown"), "active");
        let before = document.to_html();

        let changed = switcher.change_language(&LanguageCode::from("en"), &mut document).await.unwrap();

        assert!(!changed);
        assert_eq!(document.to_html(), before);
    }

    #[test]
    fn test_indicator_falls_back_to_button_text() {
        let mut document = Document::new();
        let button = document.create_element("button");
        document.set_attribute(button, "id", "langButton");
        let label = document.create_text("EN ");
        let icon = document.create_element("svg");
        document.append_child(document.body(), button).unwrap();
        document.append_child(button, label).unwrap();
        document.append_child(button, icon).unwrap();

        update_indicator(&mut document, &LanguageCode::from("fr"));

        assert_eq!(document.text(label), Some("FR "));
        assert_eq!(document.children(button), &[label, icon]);
    }

    #[tokio::test]
    async fn test_button_click_toggles_dropdown() {
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let switcher = controller(&mut document).await;
        let label = by_id(&document, "currentLangText");

        let first = switcher.resolve_click(&mut document, label);
        let second = switcher.resolve_click(&mut document, label);

        assert_eq!(first, ClickOutcome { selected: None, dropdown_open: Some(true) });
        assert_eq!(second, ClickOutcome { selected: None, dropdown_open: Some(false) });
    }

    #[tokio::test]
    async fn test_outside_click_dismisses_open_dropdown() {
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let switcher = controller(&mut document).await;
        document.add_class(by_id(&document, "langDropdown"), "active");
        let heading = document.elements_with_attribute("data-i18n")[0];

        let outcome = switcher.resolve_click(&mut document, heading);

        assert_eq!(outcome.dropdown_open, Some(false));
        assert!(!is_dropdown_open(&document));
        assert_eq!(switcher.resolve_click(&mut document, heading), ClickOutcome::default());
    }

    #[tokio::test]
    async fn test_option_click_reports_language_from_ancestor() {
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let switcher = controller(&mut document).await;
        document.add_class(by_id(&document, "langDropdown"), "active");
        let fr = option(&document, "fr");
        let inner = document.children(fr)[0];

        let outcome = switcher.resolve_click(&mut document, inner);

        assert_eq!(outcome, ClickOutcome { selected: Some(LanguageCode::from("fr")), dropdown_open: None });
        assert!(is_dropdown_open(&document));
    }

    #[tokio::test]
    async fn test_mount_translates_immediately() {
        let store = InMemoryPreferenceStore::new();
        crate::port::PreferenceStore::set(&store, "numo_language", "fr").await.unwrap();
        let mut document = PageSpec::from_yaml(PAGE).unwrap().build().unwrap();
        let state = LanguageState::initialize(Arc::new(store), LanguageCode::fallback(), &mut document).await;
        let switcher = SwitcherController::new(state);

        let report = switcher.mount(&mut document, &catalog()).unwrap();

        assert_eq!(report.translated, 1);
        assert_eq!(document.text_content(by_id(&document, "currentLangText")), "FR");
        assert_eq!(document.attribute(document.root(), "lang"), Some("fr"));
    }
}
