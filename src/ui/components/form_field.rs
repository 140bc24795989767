use dioxus::prelude::*;

use crate::ui::theme::{self, ColorScheme};

/// One `(value, label)` pair of a select input.
pub type SelectOption = (String, String);

#[component]
pub fn SelectField(
    label: &'static str,
    placeholder: &'static str,
    value: String,
    options: Vec<SelectOption>,
    disabled: bool,
    error: Option<String>,
    scheme: ColorScheme,
    onchange: EventHandler<String>,
) -> Element {
    let input_class = theme::input_class(scheme, error.is_some());
    rsx! {
        div { class: "form-row",
            label { "{label}" }
            select {
                class: input_class,
                value: "{value}",
                disabled: disabled,
                onchange: move |evt: FormEvent| onchange.call(evt.value()),
                option { value: "", "{placeholder}" }
                for (option_value, option_label) in options {
                    option {
                        key: "{option_value}",
                        value: "{option_value}",
                        selected: option_value == value,
                        "{option_label}"
                    }
                }
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

#[component]
pub fn NumberField(
    label: &'static str,
    value: String,
    disabled: bool,
    error: Option<String>,
    scheme: ColorScheme,
    oninput: EventHandler<String>,
) -> Element {
    let input_class = theme::input_class(scheme, error.is_some());
    rsx! {
        div { class: "form-row",
            label { "{label}" }
            input {
                class: input_class,
                r#type: "number",
                min: "0",
                value: "{value}",
                disabled: disabled,
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}
