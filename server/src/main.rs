mod config;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use connect4::{best_move, board_state, GameError, MoveRequest};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env();
    let app = app_router(&config);

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Listening on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn app_router(config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/move", get(handle_move))
        .route("/state", get(handle_state));
    let mut router = Router::new().nest("/api", api);
    if let Some(dir) = &config.static_dir {
        info!("Serving front-end from {}", dir.display());
        let spa = ServeDir::new(dir).append_index_html_on_directories(true);
        router = router.fallback_service(spa);
    }
    router
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

async fn handle_move(Query(req): Query<MoveRequest>) -> Result<impl IntoResponse, ApiError> {
    // The search is CPU-bound; keep it off the async workers.
    let mv = tokio::task::spawn_blocking(move || best_move(req)).await??;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

#[derive(Debug, serde::Deserialize)]
struct StateQuery {
    #[serde(default)]
    position: String,
}

async fn handle_state(Query(query): Query<StateQuery>) -> Result<impl IntoResponse, ApiError> {
    let state = board_state(&query.position)?;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(state)))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.downcast_ref::<GameError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            warn!("request failed: {:#}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
