//! Core traits for Catalog Admin
//!
//! This module defines the behaviors shared across the workspace:
//! validation of user-entered data, and the notification capability that
//! state machines use to report outcomes to the user without knowing how
//! the UI presents them.

use crate::error::{CatalogError, CatalogResult};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use uuid::Uuid;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_core::{Validatable, CatalogResult, CatalogError};
///
/// struct Draft {
///     name: String,
/// }
///
/// impl Validatable for Draft {
///     fn validate(&self) -> CatalogResult<()> {
///         if self.name.trim().is_empty() {
///             return Err(CatalogError::validation("Name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `CatalogError` describing the problem.
    fn validate(&self) -> CatalogResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(CatalogError::MissingFields(fields)) => fields
                .into_iter()
                .map(|field| format!("{} is required", field))
                .collect(),
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Icon shown next to the message
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ️",
            NotificationLevel::Success => "✅",
            NotificationLevel::Warning => "⚠️",
            NotificationLevel::Error => "❌",
        }
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification with the given level
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

/// Capability for reporting outcomes to the user
///
/// Components receive a `&dyn Notifier` instead of reaching for global
/// state; the UI supplies a toast-backed implementation, tests a recording
/// one.
pub trait Notifier {
    /// Deliver a notification
    fn notify(&self, notification: Notification);

    /// Report a success message
    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    /// Report an error message
    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Notifier that only writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::error!("{}", notification.message),
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!("{}", notification.message)
            }
        }
    }
}

/// Notifier that keeps every notification it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    /// Messages of the given level, in arrival order
    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.received
            .borrow()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.received.borrow().len()
    }

    pub fn clear(&self) {
        self.received.borrow_mut().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}

// ============================================================================
// Tests
// ============================================================================
