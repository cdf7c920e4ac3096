use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use connect4::{
    best_move, describe, take_turn, Dimensions, EngineConfig, GameError, MoveRequest,
    StateRequest, TurnRequest,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::CONFIG;

type Defaults = Arc<EngineConfig>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = &*CONFIG;
    config.engine.validate()?;
    let app = app_router(Arc::new(config.engine.clone()));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        rows = config.engine.rows,
        cols = config.engine.cols,
        depth = config.engine.depth,
        "Listening on http://{addr}"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn app_router(defaults: Defaults) -> Router {
    let api = Router::new()
        .route("/move", get(handle_move))
        .route("/state", get(handle_state))
        .route("/turn", post(handle_turn));
    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(defaults)
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct MoveQuery {
    #[serde(default)]
    position: String,
    level: Option<u8>,
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    #[serde(default)]
    position: String,
    rows: Option<usize>,
    cols: Option<usize>,
}

async fn handle_move(
    State(defaults): State<Defaults>,
    Query(query): Query<MoveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let req = MoveRequest {
        position: query.position,
        level: query.level,
        dimensions: Dimensions {
            rows: query.rows,
            cols: query.cols,
        },
    };
    let mv = tokio::task::spawn_blocking(move || best_move(&defaults, req)).await??;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

async fn handle_state(
    State(defaults): State<Defaults>,
    Query(query): Query<StateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let req = StateRequest {
        position: query.position,
        dimensions: Dimensions {
            rows: query.rows,
            cols: query.cols,
        },
    };
    let snapshot = describe(&defaults, req)?;
    Ok(Json(snapshot))
}

async fn handle_turn(
    State(defaults): State<Defaults>,
    Json(req): Json<TurnRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let turn = tokio::task::spawn_blocking(move || take_turn(&defaults, req)).await??;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(turn)))
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
        let status = match self.0.downcast_ref::<GameError>() {
            Some(GameError::InvariantViolation(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
            Some(_) => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
