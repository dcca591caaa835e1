//! Language switching: catalogs, state, page translation and feedback

pub mod applier;
mod catalog;
mod loader;
pub mod notification;
mod state;
pub mod switcher;
mod translator;

pub use catalog::*;
pub use loader::*;
pub use notification::{Notification, NotificationKind};
pub use state::LanguageState;
pub use switcher::{ClickOutcome, SwitcherController};
pub use translator::{TranslationReport, translate_page};
