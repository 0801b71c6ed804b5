use std::path::PathBuf;

use dioxus::prelude::*;
use tracing::warn;

use crate::domain::{ImagePreview, SellWizard, MAX_IMAGE_PREVIEWS};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::assets::file_data_uri;

#[component]
pub fn PhotoPicker(wizard: Signal<SellWizard>) -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut wizard = wizard;
    let mut path_input = use_signal(String::new);
    let images = wizard.with(|w| w.images().to_vec());
    let full = images.len() >= MAX_IMAGE_PREVIEWS;

    let on_add = move |_| {
        let raw = path_input().trim().to_string();
        if raw.is_empty() {
            return;
        }
        let path = PathBuf::from(&raw);
        match file_data_uri(&path) {
            Ok(data_uri) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| raw.clone());
                let preview = ImagePreview {
                    name,
                    path: raw,
                    data_uri,
                };
                if wizard.with_mut(|w| w.add_image(preview)) {
                    path_input.set(String::new());
                } else {
                    push_toast(
                        toasts,
                        ToastKind::Warning,
                        format!("You can attach up to {MAX_IMAGE_PREVIEWS} photos."),
                    );
                }
            }
            Err(err) => {
                warn!("Could not load photo {raw}: {err}");
                push_toast(toasts, ToastKind::Error, format!("Could not load photo: {err}"));
            }
        }
    };

    rsx! {
        div { class: theme::FIELD,
            label { class: theme::FIELD_LABEL, "Photos (optional)" }
            div { class: "photo-input",
                input {
                    class: theme::FIELD_INPUT,
                    placeholder: "Path to a photo, e.g. /home/me/Pictures/laptop.jpg",
                    value: path_input(),
                    disabled: full,
                    oninput: move |evt| path_input.set(evt.value()),
                }
                button { class: theme::BTN_SECONDARY, disabled: full, onclick: on_add, "Add photo" }
            }
            p { class: theme::FIELD_HINT, "{images.len()} of {MAX_IMAGE_PREVIEWS} photos attached" }
            if !images.is_empty() {
                ul { class: "photo-grid",
                    for (index, image) in images.into_iter().enumerate() {
                        li { key: "{index}-{image.name}", class: "photo",
                            img { src: "{image.data_uri}", alt: "{image.name}" }
                            button {
                                class: "photo-remove",
                                title: "Remove {image.name}",
                                onclick: move |_| {
                                    wizard.with_mut(|w| w.remove_image(index));
                                },
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
