use dioxus::prelude::*;

/// Native `<select>` over a fixed list of `(value, label)` pairs.
#[component]
pub fn FormSelect(
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
    #[props(default)] label: String,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                disabled: disabled,
                "aria-label": if label.is_empty() { None } else { Some(label.clone()) },
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
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
