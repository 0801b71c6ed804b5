use dioxus::prelude::*;

use crate::domain::{ListingField, SellWizard};
use crate::ui::theme;

fn is_required(wizard: &SellWizard, field: ListingField) -> bool {
    wizard.step().required_fields().contains(&field)
}

#[component]
fn FieldLabel(field: ListingField, required: bool) -> Element {
    rsx! {
        label { class: theme::FIELD_LABEL,
            "{field.label()}"
            if required {
                span { class: "required", " *" }
            }
        }
    }
}

/// Free-text input bound to one listing field.
#[component]
pub fn TextField(
    wizard: Signal<SellWizard>,
    field: ListingField,
    #[props(default)] placeholder: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] multiline: bool,
) -> Element {
    let mut wizard = wizard;
    let (value, required) = wizard.with(|w| (w.listing().get(field).to_string(), is_required(w, field)));

    rsx! {
        div { class: theme::FIELD,
            FieldLabel { field, required }
            if multiline {
                textarea {
                    class: theme::FIELD_INPUT,
                    rows: "3",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |evt| wizard.with_mut(|w| w.update(field, evt.value())),
                }
            } else {
                input {
                    class: theme::FIELD_INPUT,
                    r#type: "{input_type}",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |evt| wizard.with_mut(|w| w.update(field, evt.value())),
                }
            }
        }
    }
}

/// Drop-down bound to one listing field. Options are `(value, label)` pairs.
#[component]
pub fn SelectField(
    wizard: Signal<SellWizard>,
    field: ListingField,
    options: Vec<(String, String)>,
) -> Element {
    let mut wizard = wizard;
    let (value, required) = wizard.with(|w| (w.listing().get(field).to_string(), is_required(w, field)));
    let prompt = format!("Select {}", field.label().to_lowercase());

    rsx! {
        div { class: theme::FIELD,
            FieldLabel { field, required }
            select {
                class: theme::FIELD_INPUT,
                value: "{value}",
                onchange: move |evt| wizard.with_mut(|w| w.update(field, evt.value())),
                option { value: "", selected: value.is_empty(), "{prompt}" }
                for (option_value, option_label) in options {
                    option {
                        key: "{option_value}",
                        value: "{option_value}",
                        selected: option_value == value,
                        "{option_label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn CheckboxField(label: String, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        label { class: "checkbox",
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt: FormEvent| on_toggle.call(evt.checked()),
            }
            span { "{label}" }
        }
    }
}

/// Turns a plain list into `(value, label)` pairs with identical halves.
pub fn same_value_options<S: AsRef<str>>(values: &[S]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|value| (value.as_ref().to_string(), value.as_ref().to_string()))
        .collect()
}
