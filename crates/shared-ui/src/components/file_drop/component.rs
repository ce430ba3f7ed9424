use dioxus::prelude::*;

/// Click-or-drop target for a single file, with an optional image preview.
///
/// The zone only reports events. Reading and checking the file is up to the
/// handlers, which receive the raw `FormEvent` / `DragEvent`. The remove
/// button is shown only while `removable` is set.
#[component]
pub fn FileDropZone(
    title: String,
    hint: String,
    #[props(default = "*/*".to_string())] accept: String,
    #[props(default)] preview: Option<String>,
    #[props(default = "Remove".to_string())] remove_label: String,
    #[props(default = true)] removable: bool,
    #[props(default = false)] disabled: bool,
    on_select: EventHandler<FormEvent>,
    on_drop: EventHandler<DragEvent>,
    on_remove: EventHandler<()>,
) -> Element {
    let mut dragging = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        label {
            class: "file-drop",
            "data-dragging": if dragging() { "true" } else { "false" },
            "data-disabled": if disabled { "true" } else { "false" },
            ondragover: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(false);
                if !disabled {
                    on_drop.call(evt);
                }
            },
            input {
                class: "file-drop-input",
                r#type: "file",
                accept: "{accept}",
                disabled: disabled,
                onchange: move |evt: FormEvent| on_select.call(evt),
            }
            if let Some(src) = preview {
                div { class: "file-drop-preview",
                    img { src: "{src}", alt: "Selected file preview" }
                    if removable {
                        button {
                            r#type: "button",
                            class: "file-drop-remove",
                            "aria-label": "{remove_label}",
                            title: "{remove_label}",
                            disabled: disabled,
                            onclick: move |evt: MouseEvent| {
                                // Keep the click from reaching the label and opening the picker.
                                evt.prevent_default();
                                evt.stop_propagation();
                                on_remove.call(());
                            },
                            "×"
                        }
                    }
                }
            } else {
                div { class: "file-drop-prompt",
                    p { class: "file-drop-title", "{title}" }
                    p { class: "file-drop-hint", "{hint}" }
                }
            }
        }
    }
}
