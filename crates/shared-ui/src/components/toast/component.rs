use dioxus::prelude::*;
use dioxus_primitives::toast as prim;

pub use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

/// Hosts the toast stack. Mount once around the router.
#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}

/// Show a titled success toast with a description line.
pub fn notify_success(toasts: Toasts, title: &str, description: &str) {
    toasts.success(
        title.to_string(),
        ToastOptions::new().description(description.to_string()),
    );
}

/// Show a titled error toast with a description line.
pub fn notify_error(toasts: Toasts, title: &str, description: &str) {
    toasts.error(
        title.to_string(),
        ToastOptions::new().description(description.to_string()),
    );
}
