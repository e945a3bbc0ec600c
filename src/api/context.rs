//! Form context endpoint
//!
//! Supplies the dropdown contents and initial values the UI needs to
//! render the forecast form. Cities come from the store reference (all 37
//! markets); the model's training vocabulary is narrower, and cities it
//! never saw are forecast with fallback encodings.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::forecast::ForecastRequest;
use crate::AppState;

/// Promotion levels offered by the form
const PROMOTION_CHOICES: [(&str, &str); 3] = [
    ("none", "No Promotion"),
    ("standard", "Standard Promotion"),
    ("high", "High Promotion"),
];

#[derive(Debug, Serialize)]
pub struct PromotionChoice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub cities: Vec<String>,
    pub families: Vec<String>,
    pub promotion_options: Vec<PromotionChoice>,
    pub defaults: ForecastRequest,
}

/// GET /api/context
///
/// Dropdown contents and initial values for the forecast form.
pub async fn get_context(State(state): State<AppState>) -> Json<ContextResponse> {
    Json(ContextResponse {
        cities: state.forecaster.cities().to_vec(),
        families: state.forecaster.families().to_vec(),
        promotion_options: PROMOTION_CHOICES
            .iter()
            .map(|(value, label)| PromotionChoice {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        defaults: ForecastRequest::default(),
    })
}
