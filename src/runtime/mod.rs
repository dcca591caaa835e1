//! Page runtime: the mounted page, its deferred work and the public facade

mod page;
pub mod scheduler;

pub use page::{Numo, NumoOptions};
pub use scheduler::Scheduler;

use crate::{
    dom::Document,
    i18n::{Notification, SwitcherController}
};

/// Everything deferred jobs may touch, guarded as one unit
pub struct PageContext {
    pub document:      Document,
    pub switcher:      SwitcherController,
    /// Notifications still attached to the page
    pub notifications: Vec<Notification>
}

impl PageContext {
    pub fn new(document: Document, switcher: SwitcherController) -> Self {
        Self { document, switcher, notifications: Vec::new() }
    }
}
