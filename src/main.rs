use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    response::Response,
    routing::get,
};
use config::Config;
use endpoints::expenses;
use http::{HeaderName, HeaderValue, Request, header};
use state::AppState;
use tokio::{net::TcpListener, signal};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::field::Empty;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod data;
pub mod endpoints;
pub mod error;
mod services;
pub mod state;
pub mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let service_name = env!("CARGO_CRATE_NAME");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{service_name}=debug,tower_http=info,axum::rejection=trace").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_line_number(false)
                .with_file(false),
        )
        .init();

    let config = Arc::new(Config::new().context("error loading config")?);
    let state = AppState::new(config.clone());

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("error binding {}", config.addr()))?;
    tracing::debug!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    return Ok(());
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let routes = Router::new()
        .route(
            "/expenses",
            get(expenses::query)
                .post(expenses::create)
                .options(expenses::preflight)
                .head(expenses::method_not_allowed)
                .fallback(expenses::method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or("{unknown}");

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        route = matched_path,
                        status = Empty
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &tracing::Span| {
                    span.record("status", response.status().as_u16());
                    tracing::debug!(?latency, "response sent");
                }),
        );

    return cors_headers(&config).into_iter().fold(
        Router::new().nest("/api", routes),
        |router, (name, value)| router.layer(SetResponseHeaderLayer::overriding(name, value)),
    );
}

/// Sent on every response, preflight and errors included.
fn cors_headers(config: &Config) -> [(HeaderName, HeaderValue); 3] {
    return [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            config.cors_allow_origin.clone(),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ];
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("error installing ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("error installing signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::debug!("shutting down");
}

async fn health_check() -> &'static str {
    return "OK";
}
