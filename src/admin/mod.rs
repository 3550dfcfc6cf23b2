//! Dashboard HTTP server: routes, layers and lifecycle.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

mod config;
pub mod handlers;
mod state;
pub mod views;

pub use config::{AdminConfig, DEFAULT_PORT, DEFAULT_UPLOAD_LIMIT_BYTES};
pub use state::AdminState;

use crate::guard::{route_guard, LOGIN_PATH};
use handlers::{clients, health, login, pages};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the dashboard router with the guard and request-id/trace layers.
pub fn router(state: Arc<AdminState>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health::health))
        .route(LOGIN_PATH, get(login::form).post(login::submit))
        .route("/logout", post(login::logout))
        .route(pages::ASSOCIATES_PATH, get(pages::associates))
        .route(pages::CLIENTS_PATH, get(pages::clients))
        .route(pages::USERS_PATH, get(pages::users))
        .route(
            pages::NEW_CLIENT_PATH,
            get(clients::form)
                .post(clients::submit)
                .layer(DefaultBodyLimit::max(state.upload_limit_bytes())),
        )
        .fallback(pages::not_found)
        .layer(middleware::from_fn_with_state(
            state.session_cookie(),
            route_guard,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    request_id.clone(),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(state)),
        )
}

/// Start the server
/// # Errors
/// Return error if the API clients cannot be built or the port cannot be bound
pub async fn new(config: AdminConfig) -> Result<()> {
    let state = Arc::new(AdminState::new(&config)?);

    info!(
        api_url = config.api_url(),
        hotsite_api_url = config.hotsite_api_url(),
        session_cookie = config.session_cookie().name(),
        "Upstream APIs configured"
    );

    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{}", config.port())).await?;

    info!("Listening on [::]:{}", config.port());

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
