use dioxus::prelude::*;

use crate::app::{AppServices, Route};
use crate::domain::Session;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    let user = session.with(|s| s.current_user().cloned());

    let on_sign_out = {
        let mut session = session;
        move |_| {
            services.sign_out();
            session.with_mut(|s| s.sign_out());
            push_toast(toasts, ToastKind::Info, "Signed out.");
        }
    };

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "app-header-inner",
                    div { class: "brand",
                        h1 { class: "brand-title", "{APP_NAME}" }
                        p { class: "brand-tagline", "Sell your old laptop in four steps" }
                    }
                    nav { class: "app-nav",
                        NavButton {
                            active: matches!(current_route, Route::Sell {}),
                            onclick: move |_| { nav.push(Route::Sell {}); },
                            label: "Sell a device",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "Settings",
                        }
                        if let Some(user) = user {
                            span { class: "user-badge", title: "{user.email}", "{user.name}" }
                            button { class: theme::BTN_LINK, onclick: on_sign_out, "Sign out" }
                        } else {
                            NavButton {
                                active: matches!(current_route, Route::SignIn {}),
                                onclick: move |_| { nav.push(Route::SignIn {}); },
                                label: "Sign in",
                            }
                        }
                    }
                }
            }
            main { class: "app-main",
                {children}
            }
            footer { class: "app-footer", "{APP_NAME} {version_label()}" }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_button(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
