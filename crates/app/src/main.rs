use dioxus::prelude::*;

mod auth;
mod routes;

use auth::{use_auth, AuthState};
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Upper bound on request bodies. A 2 MB logo grows by a third as base64.
#[cfg(feature = "server")]
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_feature_flags();
        let flags = server::config::feature_flags();

        if flags.telemetry {
            if let Err(e) = server::telemetry::init_telemetry() {
                tracing::warn!("Telemetry disabled: {e}");
            }
        }
        server::health::record_start_time();

        let config = server::config::ServerConfig::from_env().map_err(std::io::Error::other)?;
        let pool = server::db::create_pool(&config.database_url, config.max_connections)?;
        server::db::run_migrations(&pool).await?;

        let logos =
            server::storage::LogoStore::from_flags(flags.s3).map_err(std::io::Error::other)?;
        logos.ensure_ready().await;

        let gateway = server::gateway::SchoolGateway::new(pool, logos, config.export_base_url);
        let state = server::db::AppState::new(gateway.clone());

        let mut router = dioxus::server::router(App).merge(server::openapi::api_router(state));

        if flags.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::Extension(gateway))
            .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(axum::middleware::from_fn(
                server::auth::middleware::auth_middleware,
            ))
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(AuthState::new);
    let mut auth = use_auth();

    // Restore the signed-in user from the session cookie.
    let session = use_server_future(move || async move { server::api::get_current_user().await })?;

    use_effect(move || match session.read().as_ref() {
        Some(Ok(Some(user))) => auth.sign_in(user.clone()),
        Some(Ok(None)) => auth.sign_out(),
        Some(Err(e)) => tracing::warn!("Could not restore session: {e}"),
        None => {}
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "app-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
