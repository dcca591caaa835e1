use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{Level, event};

use super::{PageContext, Scheduler};
use crate::{
    config::{Settings, TimingSettings},
    dom::{Document, NodeId},
    domain::{
        I18nError, LanguageCode,
        constant::{page_translator, switcher}
    },
    i18n::{
        ClickOutcome, LanguageState, Notification, NotificationKind, SwitcherController, TranslationCatalog,
        TranslationReport, notification
    },
    port::PreferenceStore
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumoOptions {
    pub default_language: LanguageCode,
    pub timing:           TimingSettings
}

impl From<&Settings> for NumoOptions {
    fn from(settings: &Settings) -> Self {
        Self { default_language: settings.default_language.clone(), timing: settings.timing }
    }
}

/// A mounted page with language switching wired up.
///
/// All page mutation goes through one lock; deferred passes and notification
/// teardown run on the scheduler in due order.
pub struct Numo {
    context:   Arc<Mutex<PageContext>>,
    catalog:   Arc<TranslationCatalog>,
    scheduler: Scheduler,
    timing:    TimingSettings
}

impl Numo {
    /// Page load: restore the stored language, show it and translate immediately
    pub async fn mount(
        mut document: Document,
        catalog: Arc<TranslationCatalog>,
        store: Arc<dyn PreferenceStore>,
        options: NumoOptions
    ) -> Self {
        let state = LanguageState::initialize(store, options.default_language, &mut document).await;
        let controller = SwitcherController::new(state);
        // failures are already reported by the pass; the page stays usable
        let _ = controller.mount(&mut document, &catalog);

        let context = Arc::new(Mutex::new(PageContext::new(document, controller)));
        let scheduler = Scheduler::spawn(context.clone());

        Self { context, catalog, scheduler, timing: options.timing }
    }

    pub async fn current_language(&self) -> LanguageCode {
        self.context.lock().await.switcher.current().clone()
    }

    /// Switch the page to `lang`; the translation pass follows after the transition delay.
    ///
    /// Returns whether the language changed. Selecting the active language is
    /// a no-op, and a failed persist leaves the page as it was.
    pub async fn change_language(&self, lang: impl Into<LanguageCode>) -> bool {
        let lang = lang.into();
        let mut page = self.context.lock().await;
        let PageContext { document, switcher: controller, .. } = &mut *page;

        match controller.change_language(&lang, document).await {
            Ok(true) => {
                self.schedule_transition();
                true
            }
            Ok(false) => false,
            Err(e) => {
                event!(Level::ERROR, event = switcher::CHANGE_FAILED, language = %lang, error = %e);
                false
            }
        }
    }

    /// Translate one key in the active language, falling back to the key itself
    pub async fn translate(&self, key: &str) -> String {
        let page = self.context.lock().await;
        match self.catalog.lookup(page.switcher.current(), key) {
            Some(text) => text.to_string(),
            None => {
                let missing = I18nError::key_missing(key, page.switcher.current().as_str());
                event!(Level::DEBUG, event = page_translator::KEY_MISSING, key, message = %missing);
                key.to_string()
            }
        }
    }

    /// Show a localized notification; it slides out and is removed on schedule
    pub async fn show_notification(&self, key: &str, kind: NotificationKind) -> Notification {
        let mut page = self.context.lock().await;
        let message = notification::resolve_message(&self.catalog, page.switcher.current(), key);
        let notice = notification::mount(&mut page.document, kind, &message);
        page.notifications.push(notice.clone());

        let display = self.timing.notification_display();
        let leaving = notice.clone();
        self.report(self.scheduler.schedule(display, "notification_exit", move |page| {
            notification::begin_exit(&mut page.document, &leaving);
        }));

        let removing = notice.clone();
        self.report(self.scheduler.schedule(
            display + self.timing.notification_exit(),
            "notification_remove",
            move |page| {
                notification::dismiss(&mut page.document, &removing);
                page.notifications.retain(|active| active.id != removing.id);
            }
        ));

        notice
    }

    /// Dispatch a click on `target` to the switcher
    pub async fn click(&self, target: NodeId) -> ClickOutcome {
        let mut page = self.context.lock().await;
        let PageContext { document, switcher: controller, .. } = &mut *page;

        let outcome = controller.resolve_click(document, target);
        if let Some(lang) = &outcome.selected {
            match controller.change_language(lang, document).await {
                Ok(true) => self.schedule_transition(),
                Ok(false) => {}
                Err(e) => event!(Level::ERROR, event = switcher::CHANGE_FAILED, language = %lang, error = %e)
            }
        }
        outcome
    }

    /// Run the translation pass right away, outside the transition flow
    pub async fn translate_page(&self) -> Result<TranslationReport, I18nError> {
        let mut page = self.context.lock().await;
        let PageContext { document, switcher: controller, .. } = &mut *page;
        crate::i18n::translate_page(document, &self.catalog, controller.current())
    }

    pub async fn with_document<R>(&self, read: impl FnOnce(&Document) -> R) -> R {
        read(&self.context.lock().await.document)
    }

    pub async fn active_notifications(&self) -> Vec<Notification> {
        self.context.lock().await.notifications.clone()
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    /// Wait for every deferred job, then hand back the final document
    pub async fn unmount(self) -> Result<Document, I18nError> {
        let Self { context, scheduler, .. } = self;
        scheduler.shutdown().await?;

        let page = Arc::try_unwrap(context)
            .map_err(|_| I18nError::Generic("Page is still shared after shutdown".to_string()))?
            .into_inner();
        Ok(page.document)
    }

    fn schedule_transition(&self) {
        let catalog = self.catalog.clone();
        let scheduled = self.scheduler.schedule(self.timing.transition_delay(), "translate_page", move |page| {
            let PageContext { document, switcher: controller, .. } = page;
            // a missing catalog is reported by the pass itself
            let _ = controller.finish_transition(document, &catalog);
        });
        if scheduled.is_ok() {
            event!(Level::DEBUG, event = switcher::PASS_SCHEDULED, delay_ms = self.timing.transition_delay_ms);
        }
        self.report(scheduled);
    }

    fn report(&self, scheduled: Result<(), I18nError>) {
        if let Err(e) = scheduled {
            event!(Level::ERROR, event = switcher::CHANGE_FAILED, error = %e);
        }
    }
}
