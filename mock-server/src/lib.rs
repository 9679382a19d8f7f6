use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// How long `/slow` waits before answering unless configured otherwise.
pub const DEFAULT_SLOW_DELAY: Duration = Duration::from_secs(2);

/// One request as it arrived on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub team: String,
}

#[derive(Deserialize)]
pub struct JoinGame {
    pub team: String,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;
pub type Players = Arc<RwLock<HashMap<Uuid, Player>>>;

#[derive(Clone, Debug)]
pub struct ServerState {
    pub requests: RequestLog,
    pub players: Players,
    pub slow_delay: Duration,
}

impl Default for ServerState {
    fn default() -> Self {
        Self {
            requests: RequestLog::default(),
            players: Players::default(),
            slow_delay: DEFAULT_SLOW_DELAY,
        }
    }
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with_state(ServerState::default())
}

pub fn app_with_state(state: ServerState) -> Router {
    Router::new()
        .route("/status", post(status))
        .route("/echo", post(echo))
        .route("/game/join", post(join_game))
        .route("/garbage", post(garbage))
        .route("/slow", post(slow))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, ServerState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: ServerState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

/// Buffers the body so it can be logged, then forwards the request unchanged.
async fn record(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        content_type: parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    tracing::debug!(target: "mock_server", method = %recorded.method, path = %recorded.path, "request received");
    state.requests.write().await.push(recorded);

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Bodies arrive labelled as form data but hold JSON text, so they are read
/// as strings and parsed by hand instead of through the `Json` extractor.
fn parse_object(body: &str) -> Result<Map<String, Value>, (StatusCode, Json<Value>)> {
    if body.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(body).map_err(|e| bad_request(&e.to_string()))
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn echo(body: String) -> ApiResult {
    let object = parse_object(&body)?;
    Ok(Json(Value::Object(object)))
}

async fn join_game(State(state): State<ServerState>, body: String) -> ApiResult {
    let object = parse_object(&body)?;
    let input: JoinGame =
        serde_json::from_value(Value::Object(object)).map_err(|e| bad_request(&e.to_string()))?;

    let player = Player {
        id: Uuid::new_v4(),
        team: input.team,
    };
    tracing::info!(target: "mock_server", id = %player.id, team = %player.team, "player joined");
    state.players.write().await.insert(player.id, player.clone());
    Ok(Json(json!(player)))
}

async fn garbage() -> (StatusCode, &'static str) {
    (StatusCode::OK, "this is not json")
}

async fn slow(State(state): State<ServerState>) -> Json<Value> {
    tokio::time::sleep(state.slow_delay).await;
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
