//! Forecast orchestration
//!
//! Runs the full pipeline for one request: parse and validate input,
//! resolve the store profile, build the feature vector, score it with the
//! (lazily loaded) model, price the result, then log the forecast to the
//! history table. The history insert is best effort: a database failure is
//! logged and the forecast is still returned, so a broken disk never takes
//! the predictor down with it.

use crate::db::history;
use crate::encoders::EncoderSet;
use crate::error::Result;
use crate::features;
use crate::model::ModelHandle;
use crate::revenue::{self, RevenueEstimate};
use crate::stores::StoreDirectory;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, warn};

fn default_date() -> String {
    "2017-08-16".to_string()
}

fn default_city() -> String {
    "Lagos".to_string()
}

fn default_family() -> String {
    "GROCERY I".to_string()
}

fn default_promotion() -> String {
    "none".to_string()
}

/// One forecast request, as submitted by the form
///
/// Missing fields take the form's initial values rather than failing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastRequest {
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_promotion")]
    pub promotion_status: String,
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            date: default_date(),
            city: default_city(),
            family: default_family(),
            promotion_status: default_promotion(),
        }
    }
}

/// Result of one forecast run
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub estimate: RevenueEstimate,
    /// History row id, or `None` when the insert failed
    pub history_id: Option<i64>,
}

/// Runs forecasts end to end
#[derive(Clone)]
pub struct Forecaster {
    stores: Arc<StoreDirectory>,
    encoders: Arc<EncoderSet>,
    model: Arc<ModelHandle>,
    pool: SqlitePool,
}

impl Forecaster {
    pub fn new(
        stores: Arc<StoreDirectory>,
        encoders: Arc<EncoderSet>,
        model: Arc<ModelHandle>,
        pool: SqlitePool,
    ) -> Self {
        Self {
            stores,
            encoders,
            model,
            pool,
        }
    }

    /// City choices offered by the form: the store directory's sorted
    /// distinct markets
    pub fn cities(&self) -> &[String] {
        self.stores.cities()
    }

    /// Product families offered by the form, in encoder order
    pub fn families(&self) -> &[String] {
        self.encoders.family.classes()
    }

    /// Whether the model is resident in memory
    pub fn model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Run one forecast
    ///
    /// # Arguments
    /// * `request` - Submitted form values
    ///
    /// # Returns
    /// The priced estimate plus the history row id (when the insert
    /// succeeded)
    ///
    /// # Errors
    /// * [`crate::error::Error::MalformedInput`] - unparseable date or
    ///   unknown product family
    /// * [`crate::error::Error::ModelScoring`] - model load or scoring
    ///   failure
    pub async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastOutcome> {
        let date = features::parse_date(&request.date)?;
        let store = self.stores.profile_for(&request.city);
        let vector = features::build_features(
            date,
            &request.family,
            &request.promotion_status,
            &store,
            &self.encoders,
        )?;

        let log_scale = self.model.predict(&vector.as_array()).await?;
        let estimate = revenue::estimate(log_scale, &request.family);
        debug!(
            "Forecast for {}/{} on {}: log-scale {:.4}, {:.1} units, ₦{:.2}",
            request.city, request.family, request.date, log_scale, estimate.unit_forecast,
            estimate.revenue
        );

        // Best-effort history logging. The forecast was already computed;
        // losing the log entry must not lose the answer.
        let history_id = match history::insert_prediction(
            &self.pool,
            date,
            &request.city,
            &request.family,
            estimate.revenue,
        )
        .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Failed to record forecast in history: {}", e);
                None
            }
        };

        Ok(ForecastOutcome {
            estimate,
            history_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::encoders::DEFAULT_ENCODERS_JSON;
    use crate::error::Error;
    use crate::model::SalesModel;
    use crate::stores::DEFAULT_STORES_CSV;

    /// Model returning a fixed log-scale value
    struct ConstantModel(f64);

    impl SalesModel for ConstantModel {
        fn predict(&self, _features: &[f64]) -> Result<f64> {
            Ok(self.0)
        }
    }

    async fn forecaster_with(log_scale: f64) -> (tempfile::TempDir, Forecaster) {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_database(&dir.path().join("test.db")).await.unwrap();
        let forecaster = Forecaster::new(
            Arc::new(StoreDirectory::from_csv(DEFAULT_STORES_CSV).unwrap()),
            Arc::new(EncoderSet::from_json(DEFAULT_ENCODERS_JSON).unwrap()),
            Arc::new(ModelHandle::preloaded(Arc::new(ConstantModel(log_scale)))),
            pool,
        );
        (dir, forecaster)
    }

    fn request(date: &str, city: &str, family: &str, promo: &str) -> ForecastRequest {
        ForecastRequest {
            date: date.to_string(),
            city: city.to_string(),
            family: family.to_string(),
            promotion_status: promo.to_string(),
        }
    }

    #[tokio::test]
    async fn test_forecast_happy_path() {
        // log-scale prediction decodes to 100 units
        let (_dir, forecaster) = forecaster_with((101.0f64).ln()).await;
        let outcome = forecaster
            .forecast(&request("2017-08-16", "Lagos", "GROCERY I", "none"))
            .await
            .unwrap();

        assert_eq!(outcome.estimate.formatted, "₦ 10,000,000.00");
        assert_eq!(
            outcome.estimate.detail,
            "Forecast: 5,000 items (Dept. Total) × ₦2,000/item"
        );
        assert_eq!(outcome.history_id, Some(1));
    }

    #[tokio::test]
    async fn test_forecast_is_logged_to_history() {
        let (_dir, forecaster) = forecaster_with((101.0f64).ln()).await;
        forecaster
            .forecast(&request("2017-08-16", "Lagos", "GROCERY I", "none"))
            .await
            .unwrap();

        let entries = history::recent_predictions(&forecaster.pool, 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!((entries[0].sales_prediction - 10_000_000.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_invalid_date_rejected_and_not_logged() {
        let (_dir, forecaster) = forecaster_with(3.0).await;
        let result = forecaster
            .forecast(&request("16-08-2017", "Lagos", "GROCERY I", "none"))
            .await;
        assert!(matches!(result, Err(Error::MalformedInput(_))));

        let count = history::prediction_count(&forecaster.pool).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_unknown_family_rejected() {
        let (_dir, forecaster) = forecaster_with(3.0).await;
        let result = forecaster
            .forecast(&request("2017-08-16", "Lagos", "GADGETS", "none"))
            .await;
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_city_outside_training_vocabulary_still_forecasts() {
        // Zamfara has a store row but no encoder class; the forecast runs
        // on the fallback encoding and the history keeps the submitted name
        let (_dir, forecaster) = forecaster_with((101.0f64).ln()).await;
        let outcome = forecaster
            .forecast(&request("2017-08-16", "Zamfara", "GROCERY I", "none"))
            .await
            .unwrap();
        assert!(outcome.history_id.is_some());

        let entries = history::recent_predictions(&forecaster.pool, 1)
            .await
            .unwrap();
        assert_eq!(entries[0].city, "Zamfara");
    }

    #[tokio::test]
    async fn test_city_without_store_row_uses_fallback_profile() {
        // no store row and no encoder class; both fallbacks engage
        let (_dir, forecaster) = forecaster_with((101.0f64).ln()).await;
        let outcome = forecaster
            .forecast(&request("2017-08-16", "Port Harcourt", "GROCERY I", "none"))
            .await
            .unwrap();
        assert_eq!(outcome.estimate.formatted, "₦ 10,000,000.00");
    }

    #[tokio::test]
    async fn test_history_failure_does_not_fail_forecast() {
        let (_dir, forecaster) = forecaster_with((101.0f64).ln()).await;
        forecaster.pool.close().await;

        let outcome = forecaster
            .forecast(&request("2017-08-16", "Lagos", "GROCERY I", "none"))
            .await
            .unwrap();
        assert_eq!(outcome.estimate.formatted, "₦ 10,000,000.00");
        assert_eq!(outcome.history_id, None);
    }

    #[test]
    fn test_request_defaults_match_form_initial_values() {
        let request: ForecastRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.date, "2017-08-16");
        assert_eq!(request.city, "Lagos");
        assert_eq!(request.family, "GROCERY I");
        assert_eq!(request.promotion_status, "none");
    }
}
