//! Domain constants - DOM contract names, defaults and structured log event names

/// Host markup contract
pub mod dom {
    /// Attribute carrying the content key of a taggable element
    pub const CONTENT_KEY_ATTR: &str = "data-i18n";
    /// Attribute carrying the language code of a language option
    pub const LANGUAGE_OPTION_ATTR: &str = "data-lang";
    pub const LANG_BUTTON_ID: &str = "langButton";
    pub const LANG_DROPDOWN_ID: &str = "langDropdown";
    pub const CURRENT_LANG_TEXT_ID: &str = "currentLangText";
    /// Class marking the dropdown as open
    pub const ACTIVE_CLASS: &str = "active";
}

/// Persistence and runtime defaults
pub mod defaults {
    /// Durable key holding the last selected language
    pub const STORAGE_KEY: &str = "numo_language";
    pub const FALLBACK_LANGUAGE: &str = "en";
    pub const TRANSITION_DELAY_MS: u64 = 150;
    pub const NOTIFICATION_DISPLAY_MS: u64 = 5000;
    pub const NOTIFICATION_EXIT_MS: u64 = 300;
}

/// LanguageState Events
pub mod language_state {
    pub const STATE_INITIALIZED: &str = "state.initialized";
    pub const LANGUAGE_UNCHANGED: &str = "language.unchanged";
    pub const LANGUAGE_CHANGED: &str = "language.changed";
    pub const PERSIST_FAILED: &str = "persist.failed";
    pub const RESTORE_FAILED: &str = "restore.failed";
}

/// PageTranslator Events
pub mod page_translator {
    pub const PASS_STARTED: &str = "pass.started";
    pub const PASS_COMPLETED: &str = "pass.completed";
    pub const CATALOG_MISSING: &str = "catalog.missing";
    pub const KEY_MISSING: &str = "key.missing";
}

/// SwitcherController Events
pub mod switcher {
    pub const PAGE_MOUNTED: &str = "page.mounted";
    pub const CHANGE_REQUESTED: &str = "change.requested";
    pub const CHANGE_FAILED: &str = "change.failed";
    pub const PASS_SCHEDULED: &str = "pass.scheduled";
    pub const DROPDOWN_TOGGLED: &str = "dropdown.toggled";
    pub const DROPDOWN_DISMISSED: &str = "dropdown.dismissed";
}

/// NotificationEmitter Events
pub mod notification {
    pub const NOTIFICATION_SHOWN: &str = "notification.shown";
    pub const NOTIFICATION_LEAVING: &str = "notification.leaving";
    pub const NOTIFICATION_REMOVED: &str = "notification.removed";
}

/// Scheduler Events
pub mod scheduler {
    pub const SCHEDULER_STARTED: &str = "scheduler.started";
    pub const JOB_SCHEDULED: &str = "job.scheduled";
    pub const JOB_EXECUTED: &str = "job.executed";
    pub const SCHEDULER_STOPPED: &str = "scheduler.stopped";
}

/// Catalog loading Events
pub mod catalog {
    pub const CATALOG_LOADED: &str = "catalog.loaded";
    pub const FILE_SKIPPED: &str = "file.skipped";
    pub const EMBEDDED_FALLBACK: &str = "embedded.fallback";
}
