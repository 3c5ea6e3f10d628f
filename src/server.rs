use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const INDEX_HTML: &str = concat!(
    "<h1>Metrics-Server-Exporter</h1><br>",
    "<div>Please visit <a href='/metrics'>/metrics</a> to see metrics </div>",
);

#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
}

pub fn create_router(registry: Registry) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route(
            "/metrics",
            get(metrics_handler).layer(middleware::from_fn(log_request)),
        )
        // Any other path gets the index page, like a catch-all "/" route.
        .fallback(root_handler)
        .with_state(AppState { registry })
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown.cancelled().await })
    .await
}

async fn root_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    // Whatever got encoded is still served; the caller never sees an error.
    if let Err(e) = encoder.encode(&state.registry.gather(), &mut buf) {
        error!(error = %e, "Failed to encode metrics");
    }
    ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buf)
}

async fn log_request(req: Request, next: Next) -> Response {
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    info!("{} {} {}", remote, req.method(), req.uri());
    next.run(req).await
}
