use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Button, ButtonVariant, ErrorBanner, Form, FormActions, Input};
use std::collections::HashMap;

/// Email/password sign-in.
/// Accepts an optional `redirect` query param; after login, navigates there
/// instead of the schools list.
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let redirect_target = use_signal(move || redirect);

    let go_to_destination = move || match redirect_target.read().as_ref() {
        Some(path) => {
            navigator().push(NavigationTarget::<Route>::External(path.clone()));
        }
        None => {
            navigator().push(Route::SchoolsPage {});
        }
    };

    if auth.is_authenticated() {
        go_to_destination();
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(email(), password()).await {
            Ok(user) => {
                auth.sign_in(user);
                go_to_destination();
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            div { class: "auth-card",
                h1 { class: "auth-title", "Sign In" }
                p { class: "auth-description", "Sign in to manage schools." }

                if let Some(err) = error_msg() {
                    ErrorBanner { message: err }
                }

                Form { onsubmit: handle_login,
                    Input {
                        label: "Email",
                        input_type: "email",
                        id: "email",
                        placeholder: "user@example.com",
                        value: email(),
                        error: field_errors().get("email").cloned(),
                        on_input: move |e: FormEvent| email.set(e.value()),
                    }
                    Input {
                        label: "Password",
                        input_type: "password",
                        id: "password",
                        placeholder: "Enter your password",
                        value: password(),
                        error: field_errors().get("password").cloned(),
                        on_input: move |e: FormEvent| password.set(e.value()),
                    }
                    FormActions {
                        Button {
                            variant: ButtonVariant::Primary,
                            button_type: "submit",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }

                p { class: "auth-link",
                    Link { to: Route::SchoolsPage {}, "Back to schools" }
                }
            }
        }
    }
}
