use dioxus::prelude::*;

use crate::routes::Route;

/// 404 Not Found page.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    use_hook(|| tracing::warn!("404: no route for {path}"));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./not_found.css") }

        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Oops! Page not found" }
                p { class: "not-found-message",
                    "The page "
                    code { "{path}" }
                    " doesn't exist or has been moved."
                }
                Link { to: Route::SchoolsPage {},
                    class: "not-found-link",
                    "Return to Dashboard"
                }
            }
        }
    }
}
