#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use demo_frontend::app::*;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};

    use tracing_subscriber::{
        Layer, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
    };

    let log_filter = tracing_subscriber::filter::Targets::new()
        .with_default(tracing::Level::INFO)
        .with_target("leptos_social_login", tracing::Level::DEBUG)
        .with_target("tokio", tracing::Level::WARN)
        .with_target("runtime", tracing::Level::WARN);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_thread_names(false)
        .with_thread_ids(false);

    let fmt_layer_filtered = fmt_layer.with_filter(log_filter);

    tracing_subscriber::Registry::default()
        .with(fmt_layer_filtered)
        .init();

    // GOOGLE_CLIENT_ID and FACEBOOK_APP_ID are usually kept in a local `.env` file.
    if let Err(err) = dotenvy::dotenv() {
        tracing::info!(?err, "No .env file loaded.");
    }

    let conf = get_configuration(None).expect("valid leptos configuration");
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    tracing::info!(%addr, "Serving the social login demo.");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("site address to be bindable");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server to run");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {}
