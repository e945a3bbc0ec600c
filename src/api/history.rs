//! Prediction history endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::db::history::{self, HistoryEntry};
use crate::AppState;

const MAX_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    20
}

/// Query parameters for the history listing
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum entries to return, clamped to 1..=100
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub predictions: Vec<HistoryEntry>,
}

/// GET /api/history
///
/// Most recent forecasts, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, HistoryError> {
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let predictions = history::recent_predictions(&state.db, limit)
        .await
        .map_err(|e| {
            error!("History query failed: {}", e);
            HistoryError(e.to_string())
        })?;
    Ok(Json(HistoryResponse { predictions }))
}

/// History endpoint error
#[derive(Debug)]
pub struct HistoryError(String);

impl IntoResponse for HistoryError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": format!("History unavailable: {}", self.0),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
