//! JSON handlers under `/api/`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::WebState;

#[derive(Deserialize)]
pub(super) struct AskRequest {
    #[serde(default)]
    query: String,
}

fn json_error(status: StatusCode, code: &str, msg: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": code, "message": msg.to_string() }))).into_response()
}

/// POST /api/ask
pub(super) async fn ask(State(state): State<WebState>, Json(req): Json<AskRequest>) -> Response {
    if req.query.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "empty_query", "query must not be blank");
    }

    match state.agent.run(&req.query).await {
        Ok(answer) => Json(json!({
            "answer": answer.text,
            "detected_symbol": answer.detected_symbol,
            "tool_calls": answer.tool_calls,
        }))
        .into_response(),
        Err(e) => {
            warn!(error = %e, "agent run failed");
            json_error(StatusCode::BAD_GATEWAY, "agent_error", e)
        }
    }
}

/// GET /api/health
pub(super) async fn health(State(state): State<WebState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "agent": state.agent.name(),
        "model": state.agent.model_id(),
        "tools": state.agent.tool_names(),
    }))
}
