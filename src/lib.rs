//! # Numo i18n
//!
//! Client-side language switching for the NUMO agency site.
//!
//! This crate provides functionality to:
//! - Load per-language string tables (built in, or YAML/JSON files on disk)
//! - Translate every `data-i18n` element of a page without destroying icons or nested markup
//! - Persist the visitor's language choice and restore it on the next load
//! - Drive the language switcher dropdown and show localized notifications

pub mod adapter;
pub mod config;
pub mod dom;
pub mod domain;
pub mod i18n;
pub mod port;
pub mod runtime;

pub use config::{Settings, TimingSettings};
pub use dom::{Document, NodeId, PageSpec};
pub use domain::{I18nError, LanguageCode};
pub use i18n::{CatalogLoader, NotificationKind, TranslationCatalog, TranslationReport, translate_page};
pub use runtime::{Numo, NumoOptions};
