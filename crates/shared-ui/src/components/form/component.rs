use dioxus::prelude::*;

/// Form wrapper that suppresses the browser's native submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![
        Attribute::new("class", "form", None, false),
        Attribute::new("novalidate", true, None, false),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// One labelled row inside a [`Form`].
#[component]
pub fn FormField(
    #[props(default)] label: String,
    #[props(default)] hint: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "form-field",
            if !label.is_empty() {
                span { class: "form-field-label", "{label}" }
            }
            {children}
            if let Some(hint) = hint {
                p { class: "form-field-hint", "{hint}" }
            }
        }
    }
}

/// Right-aligned row of form buttons.
#[component]
pub fn FormActions(children: Element) -> Element {
    rsx! {
        div { class: "form-actions", {children} }
    }
}
