use dioxus::prelude::*;

use crate::{
    app::{AppServices, Route},
    domain::{SellWizard, Session},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn SignInPage() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut token_input = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let has_pending = SellWizard::has_pending(&services.store);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let token = token_input().trim().to_string();
        if token.is_empty() {
            push_toast(toasts, ToastKind::Warning, "Paste your access token first.");
            return;
        }
        let services = services.clone();
        let mut session = session;
        busy.set(true);
        spawn(async move {
            match services.sign_in(&token).await {
                Ok(user) => {
                    let greeting = format!("Signed in as {}.", user.name);
                    session.set(Session::signed_in(user));
                    token_input.set(String::new());
                    push_toast(toasts, ToastKind::Success, greeting);
                    nav.push(Route::Sell {});
                }
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, format!("Sign-in failed: {err}"));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        section { class: "wizard-card narrow",
            h2 { class: "wizard-title", "Sign in" }
            if has_pending {
                p { class: "notice", "Your device details are saved and will be restored once you are signed in." }
            }
            p { class: theme::TEXT_MUTED,
                "Paste the access token from your account page. It is stored on this computer until you sign out."
            }
            form { onsubmit: on_submit,
                div { class: theme::FIELD,
                    label { class: theme::FIELD_LABEL, "Access token" }
                    input {
                        class: theme::FIELD_INPUT,
                        r#type: "password",
                        value: token_input(),
                        oninput: move |evt| token_input.set(evt.value()),
                    }
                }
                button {
                    class: theme::BTN_PRIMARY,
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
