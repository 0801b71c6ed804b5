use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use tracing::debug;

use crate::{
    app::{AppServices, Route},
    domain::{
        catalog::{
            brand_options, condition_options, year_options, BATTERY_HEALTH, DENT_LEVELS,
            OPERATING_SYSTEMS, RAM_OPTIONS, SCRATCH_LEVELS, SCREEN_CONDITIONS, SCREEN_SIZES,
            STORAGE_TYPES,
        },
        current_year, format_price, run_submission, ListingField, SellWizard, Session,
        SubmissionOrigin, SubmitAttempt, WizardHandle, WizardStep,
    },
    ui::{
        components::{
            estimate_card::EstimateCard,
            form_field::{same_value_options, CheckboxField, SelectField, TextField},
            photo_picker::PhotoPicker,
            step_indicator::StepIndicator,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

impl WizardHandle for Signal<SellWizard> {
    fn with_wizard<R>(&mut self, f: impl FnOnce(&mut SellWizard) -> R) -> R {
        self.with_mut(f)
    }
}

fn scroll_to_top() {
    let _ = document::eval("window.scrollTo({ top: 0, behavior: 'smooth' });");
}

#[component]
pub fn SellPage() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();
    let mut wizard = use_context::<Signal<SellWizard>>();

    use_hook({
        let store = services.store.clone();
        move || {
            let restored = wizard.with_mut(|w| !w.is_submitting() && w.restore_pending(&store));
            if let Some(user) = session.with(|s| s.current_user().cloned()) {
                wizard.with_mut(|w| w.prefill_contact(&user));
            }
            if restored {
                push_toast(
                    toasts,
                    ToastKind::Info,
                    "Welcome back. Your device details were restored.",
                );
            }
        }
    });

    let year = current_year();
    let step = wizard.with(|w| w.step());
    let listing = wizard.with(|w| w.listing().clone());
    let can_advance = wizard.with(|w| w.can_advance());
    let submitting = wizard.with(|w| w.is_submitting());

    if step == WizardStep::Success {
        return rsx! { SuccessPanel { wizard } };
    }

    let on_next = move |_| {
        if wizard.with_mut(|w| w.next()) {
            scroll_to_top();
        }
    };

    let on_back = move |_| {
        if wizard.with_mut(|w| w.back()) {
            scroll_to_top();
        }
    };

    let on_submit = move |_| {
        let user = session.with(|s| s.current_user().cloned());
        let client = services.client.clone();
        let store = services.store.clone();
        let mut wizard = wizard;
        // Not tied to this page, so navigating away mid-request still settles it.
        spawn_forever(async move {
            let attempt =
                run_submission(&mut wizard, &client, user.as_ref(), &store, current_year()).await;
            match attempt {
                SubmitAttempt::Completed(receipt) => {
                    debug!("Submission settled as {}", receipt.reference_id);
                    scroll_to_top();
                }
                SubmitAttempt::LoginRequired => {
                    push_toast(
                        toasts,
                        ToastKind::Info,
                        "Please sign in to submit. Your details are saved.",
                    );
                    nav.push(Route::SignIn {});
                }
                SubmitAttempt::Blocked(reason) => {
                    debug!("Submit ignored: {reason:?}");
                }
            }
        });
    };

    rsx! {
        div { class: "sell-layout",
            section { class: "wizard-card",
                StepIndicator { current: step }
                h2 { class: "wizard-title", "Step {step.number()}: {step.title()}" }
                match step {
                    WizardStep::DeviceInfo => rsx! { DeviceInfoStep { wizard, current_year: year } },
                    WizardStep::Specifications => rsx! { SpecificationsStep { wizard } },
                    WizardStep::Condition => rsx! { ConditionStep { wizard } },
                    _ => rsx! { ContactStep { wizard } },
                }
                div { class: "wizard-actions",
                    button {
                        class: theme::BTN_SECONDARY,
                        disabled: step == WizardStep::DeviceInfo || submitting,
                        onclick: on_back,
                        "Back"
                    }
                    if step == WizardStep::ContactDetails {
                        button {
                            class: theme::BTN_PRIMARY,
                            disabled: !can_advance,
                            onclick: on_submit,
                            if submitting { "Submitting..." } else { "Submit for offer" }
                        }
                    } else {
                        button {
                            class: theme::BTN_PRIMARY,
                            disabled: !can_advance,
                            onclick: on_next,
                            "Next"
                        }
                    }
                }
            }
            aside { class: "sell-sidebar",
                EstimateCard { listing, current_year: year }
            }
        }
    }
}

#[component]
fn DeviceInfoStep(wizard: Signal<SellWizard>, current_year: i32) -> Element {
    rsx! {
        div { class: "field-grid",
            SelectField { wizard, field: ListingField::Brand, options: same_value_options(&brand_options()) }
            TextField { wizard, field: ListingField::Model, placeholder: "e.g. Latitude 7420".to_string() }
            SelectField { wizard, field: ListingField::Year, options: same_value_options(&year_options(current_year)) }
            SelectField { wizard, field: ListingField::Condition, options: same_value_options(&condition_options()) }
        }
    }
}

#[component]
fn SpecificationsStep(wizard: Signal<SellWizard>) -> Element {
    let storage_types = STORAGE_TYPES
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect::<Vec<_>>();

    rsx! {
        div { class: "field-grid",
            TextField { wizard, field: ListingField::Processor, placeholder: "e.g. Intel Core i5-1135G7".to_string() }
            SelectField { wizard, field: ListingField::Ram, options: same_value_options(RAM_OPTIONS) }
            TextField { wizard, field: ListingField::Storage, placeholder: "e.g. 512".to_string(), input_type: "number".to_string() }
            SelectField { wizard, field: ListingField::StorageType, options: storage_types }
            SelectField { wizard, field: ListingField::ScreenSize, options: same_value_options(SCREEN_SIZES) }
            TextField { wizard, field: ListingField::Graphics, placeholder: "e.g. NVIDIA RTX 3050 (optional)".to_string() }
            SelectField { wizard, field: ListingField::OperatingSystem, options: same_value_options(OPERATING_SYSTEMS) }
        }
    }
}

#[component]
fn ConditionStep(wizard: Signal<SellWizard>) -> Element {
    let mut wizard = wizard;
    let (charger, original_box) = wizard.with(|w| (w.listing().charger_included, w.listing().original_box));

    rsx! {
        div { class: "field-grid",
            SelectField { wizard, field: ListingField::Scratches, options: same_value_options(SCRATCH_LEVELS) }
            SelectField { wizard, field: ListingField::Dents, options: same_value_options(DENT_LEVELS) }
            SelectField { wizard, field: ListingField::ScreenCondition, options: same_value_options(SCREEN_CONDITIONS) }
            SelectField { wizard, field: ListingField::BatteryHealth, options: same_value_options(BATTERY_HEALTH) }
        }
        TextField {
            wizard,
            field: ListingField::FunctionalIssues,
            placeholder: "Keyboard, ports, speakers, hinges... (optional)".to_string(),
            multiline: true,
        }
        div { class: "checkbox-row",
            CheckboxField {
                label: "Original charger included".to_string(),
                checked: charger,
                on_toggle: move |value| wizard.with_mut(|w| w.set_charger_included(value)),
            }
            CheckboxField {
                label: "Original box included".to_string(),
                checked: original_box,
                on_toggle: move |value| wizard.with_mut(|w| w.set_original_box(value)),
            }
        }
        PhotoPicker { wizard }
    }
}

#[component]
fn ContactStep(wizard: Signal<SellWizard>) -> Element {
    rsx! {
        div { class: "field-grid",
            TextField { wizard, field: ListingField::Name }
            TextField { wizard, field: ListingField::Email, input_type: "email".to_string() }
            TextField { wizard, field: ListingField::Phone, input_type: "tel".to_string() }
            TextField { wizard, field: ListingField::Pincode }
            TextField { wizard, field: ListingField::City }
        }
        TextField { wizard, field: ListingField::Address, multiline: true }
    }
}

#[component]
fn SuccessPanel(wizard: Signal<SellWizard>) -> Element {
    let mut wizard = wizard;
    let Some(receipt) = wizard.with(|w| w.receipt().cloned()) else {
        return rsx! { Fragment {} };
    };
    if receipt.origin == SubmissionOrigin::LocalFallback {
        debug!("Showing success for locally recorded request {}", receipt.reference_id);
    }

    rsx! {
        section { class: "wizard-card success-card",
            h2 { class: "wizard-title", "Request received!" }
            p { "Our team will call you within 24 hours to schedule a free pickup." }
            dl { class: "receipt",
                dt { "Reference" }
                dd { class: "receipt-reference", "{receipt.reference_id}" }
                dt { "Estimated offer" }
                dd { class: "estimate-value", "{format_price(receipt.estimated_price)}" }
            }
            button {
                class: theme::BTN_PRIMARY,
                onclick: move |_| {
                    if wizard.with_mut(|w| w.start_new_sale()) {
                        scroll_to_top();
                    }
                },
                "Sell another device"
            }
        }
    }
}
