//! # Input Components
//!
//! Form inputs shared by the filter panel, the search bar and the
//! creation dialog:
//! - **TextInput**: Single-line text input
//! - **Select**: Dropdown selection, with a loading state for options
//!   that are still being fetched

use catalog_core::{CatalogEntry, LocationId};
use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text (optional)
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Leading icon
    #[props(default)]
    pub prefix: Option<String>,

    /// Whether the input is required
    #[props(default = false)]
    pub required: bool,

    /// Whether the input is disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Additional CSS classes
    #[props(default)]
    pub class: Option<String>,

    /// Change handler, called on every keystroke
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Enter key handler
    #[props(default)]
    pub on_enter: EventHandler<String>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = field_class(props.disabled, props.prefix.is_some(), &props.class);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "field-label",
                    "{label}"
                    if props.required {
                        span { class: "required-mark", "*" }
                    }
                }
            }

            div {
                class: "input-wrapper",

                if let Some(prefix) = &props.prefix {
                    span { class: "input-prefix", "{prefix}" }
                }

                input {
                    class: "{input_class}",
                    r#type: "text",
                    value: "{props.value}",
                    placeholder: props.placeholder.as_deref().unwrap_or(""),
                    disabled: props.disabled,
                    oninput: move |e| props.on_change.call(e.value()),
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            props.on_enter.call(props.value.clone());
                        }
                    },
                }
            }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// A single option for the Select component
#[derive(Clone, PartialEq, Debug)]
pub struct SelectOption {
    /// Option value
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create a new select option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for a list of catalog records, keyed by id
pub fn entry_options<T: CatalogEntry>(entries: &[T]) -> Vec<SelectOption> {
    entries
        .iter()
        .map(|entry| SelectOption::new(entry.id().to_string(), entry.name()))
        .collect()
}

/// The `<select>` value for an optional id
pub fn selection_value(id: Option<LocationId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Parse a `<select>` value back into an id; the placeholder means none
pub fn parse_selection(value: &str) -> Option<LocationId> {
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Ignoring selection '{}': {}", value, e);
            None
        }
    }
}

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value, empty for none
    pub value: String,

    /// Available options
    pub options: Vec<SelectOption>,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder, also offered as the "no selection" entry
    #[props(default)]
    pub placeholder: Option<String>,

    /// Whether required
    #[props(default = false)]
    pub required: bool,

    /// Whether disabled
    #[props(default = false)]
    pub disabled: bool,

    /// Whether the options are still being fetched
    #[props(default = false)]
    pub loading: bool,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let disabled = props.disabled || props.loading;
    let select_class = field_class(disabled, false, &None);
    let placeholder = if props.loading {
        Some("Loading…".to_string())
    } else {
        props.placeholder.clone()
    };

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label {
                    class: "field-label",
                    "{label}"
                    if props.required {
                        span { class: "required-mark", "*" }
                    }
                }
            }

            select {
                class: "{select_class} select",
                disabled: disabled,
                onchange: move |e| props.on_change.call(e.value()),

                if let Some(placeholder) = placeholder {
                    option {
                        value: "",
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build the class string shared by inputs and selects
fn field_class(disabled: bool, has_prefix: bool, extra: &Option<String>) -> String {
    let mut classes = vec!["field"];
    if has_prefix {
        classes.push("field-with-prefix");
    }
    if disabled {
        classes.push("field-disabled");
    }

    let mut result = classes.join(" ");
    if let Some(extra) = extra {
        result.push(' ');
        result.push_str(extra);
    }
    result
}

// ============================================================================
// Tests
// ============================================================================
