use dioxus::prelude::*;

use crate::{
    app::AppServices,
    domain::{format_price, Session},
    infra::offline::{clear_offline_submissions, load_offline_submissions},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    // Bumped after clearing so the list below re-reads the store.
    let mut revision = use_signal(|| 0_u32);
    let _ = revision();
    let offline = load_offline_submissions(&services.store);

    let user = session.with(|s| s.current_user().cloned());
    let api_url = services.client.base_url().to_string();
    let store_path = services.store.root().display().to_string();

    let on_clear = move |_| match clear_offline_submissions(&services.store) {
        Ok(()) => {
            revision += 1;
            push_toast(toasts, ToastKind::Info, "Cleared locally saved requests.");
        }
        Err(err) => {
            push_toast(toasts, ToastKind::Error, format!("Failed to clear: {err}"));
        }
    };

    rsx! {
        div { class: "stack",
            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Connection" }
                dl { class: "receipt",
                    dt { "Backend" }
                    dd { "{api_url}" }
                    dt { "Local data" }
                    dd { "{store_path}" }
                    dt { "Account" }
                    dd {
                        match user {
                            Some(user) => rsx! { "{user.name} ({user.email})" },
                            None => rsx! { "Not signed in" },
                        }
                    }
                }
                p { class: theme::FIELD_HINT, "Set BUYBACK_API_URL or BUYBACK_DATA_DIR before launch to change these." }
            }

            section { class: theme::PANEL,
                h2 { class: theme::PANEL_TITLE, "Requests saved on this computer" }
                if offline.is_empty() {
                    p { class: theme::TEXT_MUTED, "Nothing pending. Every request reached our servers." }
                } else {
                    p { class: theme::TEXT_MUTED,
                        "These requests could not reach our servers when you submitted them."
                    }
                    table { class: "table",
                        thead {
                            tr {
                                th { "Reference" }
                                th { "Device" }
                                th { "Estimate" }
                                th { "Submitted" }
                            }
                        }
                        tbody {
                            for entry in offline {
                                tr { key: "{entry.reference_id}",
                                    td { "{entry.reference_id}" }
                                    td { "{entry.payload.listing.brand} {entry.payload.listing.model}" }
                                    td { "{format_price(entry.payload.estimated_price)}" }
                                    td { title: "{entry.error}", "{entry.submitted_at}" }
                                }
                            }
                        }
                    }
                    button { class: theme::BTN_DANGER, onclick: on_clear, "Clear saved requests" }
                }
            }
        }
    }
}
