//! HTTP transport for the Kaiwa engine.
//!
//! Owns the request/response envelope, identity defaults, and status
//! mapping. The engine itself never sees HTTP.

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::brain::ResponseEngine;
use crate::store::{ConversationWriter, HistoryReader, SqliteStore};

/// Identity assigned when the caller does not provide one.
const ANONYMOUS_USER: &str = "anonymous_user";

/// Records returned by the history endpoint.
const HISTORY_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<ResponseEngine>,
    pub store: Arc<SqliteStore>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    pub message: String,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub user_id: Option<String>,
}

fn error_body(message: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": message }))
}

fn iso_timestamp(unix_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(unix_seconds, 0)
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_default()
}

async fn chat(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    let message = req.message.trim().to_string();
    if req.validate().is_err() || message.is_empty() {
        return (StatusCode::BAD_REQUEST, error_body("メッセージが空です"));
    }

    let user_id = req.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string());
    let session_id = req
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state.engine.respond(&message, &user_id).await;

    // A lost write is a lost conversation turn: the failure surfaces as a
    // 500 instead of being swallowed.
    if let Err(err) = state
        .store
        .save(
            &user_id,
            &message,
            &reply.response,
            &session_id,
            reply.sentiment,
            &reply.intent,
        )
        .await
    {
        error!(error = %err, %user_id, "failed to save conversation");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_body("サーバーエラーが発生しました"),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "response": reply.response,
            "sentiment": reply.sentiment,
            "intent": reply.intent,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

async fn history(
    State(state): State<ApiState>,
    Query(params): Query<UserParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let user_id = params.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string());

    match state.store.fetch_recent(&user_id, HISTORY_LIMIT).await {
        Ok(records) => {
            let conversations: Vec<serde_json::Value> = records
                .iter()
                .map(|record| {
                    serde_json::json!({
                        "user_message": record.user_message,
                        "bot_response": record.bot_response,
                        "sentiment": record.sentiment,
                        "intent": record.intent,
                        "timestamp": iso_timestamp(record.timestamp),
                    })
                })
                .collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({ "conversations": conversations })),
            )
        }
        Err(err) => {
            error!(error = %err, %user_id, "failed to fetch history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("履歴の取得に失敗しました"),
            )
        }
    }
}

async fn analytics(
    State(state): State<ApiState>,
    Query(params): Query<UserParams>,
) -> (StatusCode, Json<serde_json::Value>) {
    let user_id = params.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string());

    let breakdown = state.store.sentiment_breakdown(&user_id).await;
    let top = state.store.top_intents(&user_id).await;

    match (breakdown, top) {
        (Ok(sentiment_analysis), Ok(top_intents)) => {
            let pattern = state.engine.user_pattern(&user_id).await;
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "sentiment_analysis": sentiment_analysis,
                    "top_intents": top_intents,
                    "pattern": pattern,
                })),
            )
        }
        (Err(err), _) | (_, Err(err)) => {
            error!(error = %err, %user_id, "failed to fetch analytics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("分析データの取得に失敗しました"),
            )
        }
    }
}

async fn health(State(state): State<ApiState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "status": "unhealthy", "error": err.to_string() })),
        ),
    }
}

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
        .route("/analytics", get(analytics))
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until shutdown.
pub async fn start_server(state: ApiState, port: u16) -> Result<(), std::io::Error> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await
}
