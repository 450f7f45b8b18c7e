//! # Toasts
//!
//! Transient notifications stacked in the bottom-right corner. Each toast
//! dismisses itself after the configured time or when clicked.

use catalog_core::{Notification, NotificationLevel};
use dioxus::prelude::*;

use crate::hooks::use_catalog_actions;
use crate::state::APP_STATE;

/// Stack of the visible toasts, oldest on top
#[component]
pub fn ToastStack() -> Element {
    let toasts = APP_STATE.read().ui.toasts.clone();

    rsx! {
        div {
            class: "toast-stack",
            role: "status",
            for toast in toasts {
                Toast { key: "{toast.id}", notification: toast }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification) -> Element {
    let actions = use_catalog_actions();
    let id = notification.id;

    rsx! {
        div {
            class: "toast {level_class(notification.level)}",
            onclick: move |_| actions.dismiss_toast(id),
            span { class: "toast-icon", "{notification.level.icon()}" }
            span { class: "toast-message", "{notification.message}" }
        }
    }
}

fn level_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "toast-info",
        NotificationLevel::Success => "toast-success",
        NotificationLevel::Warning => "toast-warning",
        NotificationLevel::Error => "toast-error",
    }
}
