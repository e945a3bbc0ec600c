//! salescast library - Nigeria retail sales forecasting module
//!
//! Serves a browser form that turns a date, city, product family, and
//! promotion status into a projected Naira revenue figure. A trained
//! regression model (loaded lazily on first use) predicts log-scale unit
//! sales; the pipeline scales that to a department total, prices it with
//! per-family unit prices, and logs every forecast to SQLite.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;
pub mod currency;
pub mod db;
pub mod encoders;
pub mod error;
pub mod features;
pub mod forecast;
pub mod model;
pub mod prices;
pub mod revenue;
pub mod stores;

pub use error::{Error, Result};

use forecast::Forecaster;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Forecast pipeline
    pub forecaster: Forecaster,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, forecaster: Forecaster) -> Self {
        Self { db, forecaster }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/context", get(api::get_context))
        .route("/api/predict", post(api::post_predict))
        .route("/api/history", get(api::get_history))
        .merge(api::health_routes())
        .with_state(state)
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
