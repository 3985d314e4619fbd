use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::assistant::Assistant;
use crate::models::{ChatMessage, Reply};
use crate::session::DEFAULT_SESSION;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub knowledge_mode: String,
}

/// Error body returned with a 500
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: String,
}

impl ApiError {
    fn internal(detail: impl Into<String>) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                detail: detail.into(),
            }),
        )
            .into_response()
    }
}

pub fn router(assistant: Arc<Assistant>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/summary", post(summary))
        .route("/health", get(health))
        .with_state(assistant)
}

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

async fn chat(
    State(assistant): State<Arc<Assistant>>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Reply>, Response> {
    let session = session_id(&headers);

    // A panic inside the session task surfaces as a 500
    let reply = tokio::spawn(async move { assistant.chat(&session, &payload.query).await })
        .await
        .map_err(|err| {
            error!("Chat handler failed: {}", err);
            ApiError::internal(err.to_string())
        })?;

    Ok(Json(reply))
}

async fn summary(
    State(assistant): State<Arc<Assistant>>,
    Json(payload): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, Response> {
    match assistant.summarize(&payload.messages).await {
        Ok(summary) => Ok(Json(SummaryResponse { summary })),
        Err(err) => {
            error!("Failed to save summary: {}", err);
            Err(ApiError::internal("Failed to save summary"))
        }
    }
}

async fn health(State(assistant): State<Arc<Assistant>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        knowledge_mode: assistant.knowledge_mode().to_string(),
    })
}
