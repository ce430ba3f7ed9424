use dioxus::prelude::*;

/// Filter row: a search field followed by selects and action buttons.
#[component]
pub fn SearchBar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-bar",
            {children}
        }
    }
}

/// Search text field. Emits every keystroke; debouncing is the caller's job.
#[component]
pub fn SearchInput(
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] placeholder: String,
) -> Element {
    rsx! {
        div { class: "search-input",
            span { class: "search-input-icon", "aria-hidden": "true", "⌕" }
            input {
                r#type: "search",
                value: value,
                placeholder: placeholder,
                "aria-label": "Search",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}
