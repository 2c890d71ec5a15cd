#[cfg(feature = "desktop")]
pub mod commands;
pub mod err;
pub mod panel;
pub mod query;
pub mod store;
pub mod student;
pub mod validator;

use std::sync::{Mutex, MutexGuard};

use panel::Panel;

use crate::config::Settings;

/// State shared with the webview. The single lock serialises every write to
/// the roster.
pub struct AppState {
    pub panel: Mutex<Panel>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            panel: Mutex::new(Panel::new()),
            settings,
        }
    }

    /// A poisoned lock still holds a consistent roster: records are only
    /// appended after validation has finished.
    pub fn panel(&self) -> MutexGuard<'_, Panel> {
        self.panel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
