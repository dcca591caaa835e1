//! Notification emitter: transient, localized feedback elements

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};
use uuid::Uuid;

use super::TranslationCatalog;
use crate::{
    dom::{Document, NodeId},
    domain::{LanguageCode, constant::notification}
};

const ENTER_ANIMATION: &str = "slideInRight 0.3s ease";
const EXIT_ANIMATION: &str = "slideOutRight 0.3s ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error"
        }
    }

    fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error => "#ef4444"
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification element currently attached to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id:         Uuid,
    pub node:       NodeId,
    pub kind:       NotificationKind,
    pub message:    String,
    pub created_at: DateTime<Utc>
}

/// Localized string for `key`, or the key itself when unresolved
pub fn resolve_message(catalog: &TranslationCatalog, lang: &LanguageCode, key: &str) -> String {
    catalog.lookup(lang, key).unwrap_or(key).to_string()
}

/// Create the notification element and append it to the body
pub fn mount(document: &mut Document, kind: NotificationKind, message: &str) -> Notification {
    let node = document.create_element("div");
    document.set_attribute(node, "class", &format!("notification notification-{}", kind));
    document.set_attribute(node, "style", &style(kind, ENTER_ANIMATION));
    document.set_text_content(node, message);

    // the body always accepts element children
    let _ = document.append_child(document.body(), node);

    let notice = Notification { id: Uuid::new_v4(), node, kind, message: message.to_string(), created_at: Utc::now() };
    event!(Level::DEBUG, event = notification::NOTIFICATION_SHOWN, id = %notice.id, kind = %kind);
    notice
}

/// Switch the element to its exit animation
pub fn begin_exit(document: &mut Document, notice: &Notification) {
    document.set_style_property(notice.node, "animation", EXIT_ANIMATION);
    event!(Level::DEBUG, event = notification::NOTIFICATION_LEAVING, id = %notice.id);
}

/// Detach the element from the body; returns false if it was already gone
pub fn dismiss(document: &mut Document, notice: &Notification) -> bool {
    let removed = document.remove_child(document.body(), notice.node);
    event!(Level::DEBUG, event = notification::NOTIFICATION_REMOVED, id = %notice.id, removed);
    removed
}

fn style(kind: NotificationKind, animation: &str) -> String {
    [
        ("position", "fixed"),
        ("top", "100px"),
        ("right", "20px"),
        ("background-color", kind.background()),
        ("color", "white"),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "0.5rem"),
        ("box-shadow", "0 10px 15px -3px rgba(0, 0, 0, 0.1)"),
        ("z-index", "10000"),
        ("animation", animation),
        ("max-width", "400px")
    ]
    .iter()
    .map(|(property, value)| format!("{}: {};", property, value))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_message_falls_back_to_key() {
        let catalog = TranslationCatalog::from_pairs([("fr", vec![("form_success", "Merci !")])]);
        let fr = LanguageCode::from("fr");

        assert_eq!(resolve_message(&catalog, &fr, "form_success"), "Merci !");
        assert_eq!(resolve_message(&catalog, &fr, "form_error"), "form_error");
        assert_eq!(resolve_message(&catalog, &LanguageCode::from("de"), "form_success"), "form_success");
    }

    #[test]
    fn test_mount_exit_dismiss_lifecycle() {
        let mut document = Document::new();

        let notice = mount(&mut document, NotificationKind::Error, "Oops");

        assert!(document.has_class(notice.node, "notification-error"));
        assert_eq!(document.text_content(notice.node), "Oops");
        let style_attr = document.attribute(notice.node, "style").unwrap();
        assert!(style_attr.contains("background-color: #ef4444;"));
        assert!(style_attr.contains("slideInRight"));

        begin_exit(&mut document, &notice);
        assert!(document.attribute(notice.node, "style").unwrap().contains("slideOutRight"));

        assert!(dismiss(&mut document, &notice));
        assert!(!document.is_connected(notice.node));
        assert!(!dismiss(&mut document, &notice));
    }

    #[test]
    fn test_notifications_are_independent_elements() {
        let mut document = Document::new();

        let first = mount(&mut document, NotificationKind::Success, "One");
        let second = mount(&mut document, NotificationKind::Success, "One");

        assert_ne!(first.node, second.node);
        assert_ne!(first.id, second.id);
        assert_eq!(document.children(document.body()), &[first.node, second.node]);
    }

    #[test]
    fn test_empty_message_falls_back_to_key() {
        let catalog = TranslationCatalog::from_pairs([("en", vec![("blank", "")])]);

        assert_eq!(resolve_message(&catalog, &LanguageCode::from("en"), "blank"), "blank");
    }
}
