use dioxus::prelude::*;

/// Centered message for a list with nothing to show, with an optional action.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "empty-state",
            p { class: "empty-state-title", "{title}" }
            if let Some(description) = description {
                p { class: "empty-state-description", "{description}" }
            }
            div { class: "empty-state-actions", {children} }
        }
    }
}

/// Inline error banner that stays until the page state changes.
#[component]
pub fn ErrorBanner(message: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "error-banner", role: "alert", "{message}" }
    }
}
