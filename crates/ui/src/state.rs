//! Application State Management for Catalog Admin
//!
//! The screen's domain state lives in a [`CatalogSession`]; this module
//! wraps it together with purely visual state (theme, toasts) in a single
//! Dioxus 0.7 global signal.

use catalog_core::{CatalogConfig, Notification, Notifier, Theme, TracingNotifier};
use catalog_state::CatalogSession;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::time::Duration;
use uuid::Uuid;

/// Toasts shown at once; older ones are dropped first
pub const MAX_TOASTS: usize = 4;

// ============================================================================
// UI State
// ============================================================================

/// Visual state that has no meaning outside the desktop shell
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Whether dark mode is enabled
    pub dark_mode: bool,
    /// Visible toasts, oldest first
    pub toasts: Vec<Notification>,
    /// How long a toast stays up
    pub notification_ttl: Duration,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

impl UiState {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            dark_mode: config.theme.is_dark(),
            toasts: Vec::new(),
            notification_ttl: config.notification_ttl,
        }
    }

    /// Toggle dark mode
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Root CSS class for the active theme
    pub fn theme_class(&self) -> &'static str {
        if self.dark_mode {
            "theme-dark"
        } else {
            "theme-light"
        }
    }

    pub fn push_toast(&mut self, notification: Notification) {
        self.toasts.push(notification);
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
    }

    /// Remove a toast; returns false when it was already gone
    pub fn dismiss_toast(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Filter, search, table and creation form
    pub session: CatalogSession,
    /// UI state
    pub ui: UiState,
}

impl AppState {
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            session: CatalogSession::new(config),
            ui: UiState::from_config(config),
        }
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global application state signal
/// Use this in components to access and modify app state
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::default);

/// Reset the global state from configuration
/// Call this once from the root component
pub fn init_app_state(config: &CatalogConfig) {
    *APP_STATE.write() = AppState::from_config(config);
}

// ============================================================================
// Toast Notifier
// ============================================================================

/// Collects notifications raised while [`APP_STATE`] is borrowed
///
/// State operations run inside `APP_STATE.write()`, so they cannot push
/// toasts themselves. Hand them a queue, drop the borrow, then `flush`.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: RefCell<Vec<Notification>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything queued so far
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Show the queued toasts and schedule their dismissal
    ///
    /// Dismissal timers run on the root scope so they survive the
    /// component that raised the toast.
    pub fn flush(self) {
        let toasts = self.take();
        if toasts.is_empty() {
            return;
        }

        let ttl = {
            let mut state = APP_STATE.write();
            for toast in &toasts {
                state.ui.push_toast(toast.clone());
            }
            state.ui.notification_ttl
        };

        for toast in toasts {
            let id = toast.id;
            TracingNotifier.notify(toast);
            spawn_forever(async move {
                tokio::time::sleep(ttl).await;
                APP_STATE.write().ui.dismiss_toast(id);
            });
        }
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        self.pending.borrow_mut().push(notification);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ui_state_from_config() {
        let config = CatalogConfig {
            theme: Theme::Light,
            notification_ttl: Duration::from_secs(9),
            ..CatalogConfig::default()
        };
        let ui = UiState::from_config(&config);
        assert!(!ui.dark_mode);
        assert_eq!(ui.theme_class(), "theme-light");
        assert_eq!(ui.notification_ttl, Duration::from_secs(9));
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut ui = UiState::default();
        assert_eq!(ui.theme(), Theme::Dark);

        ui.toggle_dark_mode();
        assert_eq!(ui.theme(), Theme::Light);
        assert_eq!(ui.theme_class(), "theme-light");
    }

    #[test]
    fn test_toasts_are_capped() {
        let mut ui = UiState::default();
        for i in 0..6 {
            ui.push_toast(Notification::info(format!("message {}", i)));
        }

        let messages: Vec<_> = ui.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["message 2", "message 3", "message 4", "message 5"]);
    }

    #[test]
    fn test_dismiss_toast() {
        let mut ui = UiState::default();
        let toast = Notification::success("Street created successfully");
        let id = toast.id;
        ui.push_toast(toast);

        assert!(ui.dismiss_toast(id));
        assert!(ui.toasts.is_empty());
        assert!(!ui.dismiss_toast(id));
    }

    #[test]
    fn test_app_state_uses_configured_page_size() {
        let config = CatalogConfig {
            page_size: 25,
            ..CatalogConfig::default()
        };
        let state = AppState::from_config(&config);
        assert_eq!(state.session.table.state.page_size(), 25);
    }

    #[test]
    fn test_toast_queue_collects() {
        let queue = ToastQueue::new();
        queue.error("Error loading regions: timeout");
        queue.success("Street created successfully");

        let taken = queue.take();
        assert_eq!(taken.len(), 2);
        assert!(queue.take().is_empty());
    }
}
