//! Forecast endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::error::Error;
use crate::forecast::ForecastRequest;
use crate::AppState;

/// Successful forecast response
///
/// Echoes the submitted values so the form stays sticky across
/// submissions.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub formatted_revenue: String,
    pub detail: String,
    pub history_id: Option<i64>,
    #[serde(flatten)]
    pub request: ForecastRequest,
}

/// POST /api/predict
///
/// Runs one forecast and logs it to the history table.
pub async fn post_predict(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<PredictResponse>, PredictError> {
    match state.forecaster.forecast(&request).await {
        Ok(outcome) => Ok(Json(PredictResponse {
            formatted_revenue: outcome.estimate.formatted,
            detail: outcome.estimate.detail,
            history_id: outcome.history_id,
            request,
        })),
        Err(e) => {
            if !matches!(e, Error::MalformedInput(_)) {
                error!("Forecast failed: {}", e);
            }
            Err(PredictError { error: e, request })
        }
    }
}

/// Forecast endpoint error, still carrying the request for the sticky form
#[derive(Debug)]
pub struct PredictError {
    error: Error,
    request: ForecastRequest,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match self.error {
            Error::MalformedInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.error.user_message(),
            "date": self.request.date,
            "city": self.request.city,
            "family": self.request.family,
            "promotion_status": self.request.promotion_status,
        }));

        (status, body).into_response()
    }
}
