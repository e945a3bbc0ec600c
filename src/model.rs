//! Trained sales model loading and scoring
//!
//! The regression model predicts log-scale sales (the training target was
//! `log1p(sales)`). The artifact (`sales_model.json`) holds an intercept
//! and one named coefficient per feature column; loading validates the
//! names against [`FEATURE_NAMES`] so a stale artifact cannot silently
//! score with misaligned columns.
//!
//! [`ModelHandle`] wraps the model in a lazy, load-once cell. The first
//! prediction triggers the load (file I/O and parsing run on a blocking
//! thread); concurrent first predictions wait on the same load instead of
//! racing, and a failed load leaves the cell empty so the next prediction
//! retries.

use crate::error::{Error, Result};
use crate::features::FEATURE_NAMES;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Compiled-in model artifact, used when the root folder has none
pub(crate) const DEFAULT_MODEL_JSON: &str = include_str!("defaults/sales_model.json");

/// A scoring model that maps a feature vector to log-scale sales
pub trait SalesModel: Send + Sync {
    /// Predicted log-scale sales for one feature vector
    ///
    /// # Errors
    /// Returns [`Error::ModelScoring`] if the vector has the wrong length
    /// or the prediction is not finite.
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// On-disk shape of `sales_model.json`
#[derive(Debug, Deserialize)]
struct ModelFile {
    intercept: f64,
    coefficients: HashMap<String, f64>,
}

/// Linear regression model with one weight per feature column
#[derive(Debug, Clone)]
pub struct LinearSalesModel {
    intercept: f64,
    /// Weights in [`FEATURE_NAMES`] order
    weights: Vec<f64>,
}

impl LinearSalesModel {
    /// Parse and validate a model artifact from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(json)
            .map_err(|e| Error::ModelScoring(format!("Invalid model artifact: {}", e)))?;

        let mut weights = Vec::with_capacity(FEATURE_NAMES.len());
        for name in FEATURE_NAMES {
            let weight = file.coefficients.get(name).ok_or_else(|| {
                Error::ModelScoring(format!("Model artifact missing coefficient '{}'", name))
            })?;
            if !weight.is_finite() {
                return Err(Error::ModelScoring(format!(
                    "Coefficient '{}' is not finite",
                    name
                )));
            }
            weights.push(*weight);
        }
        if file.coefficients.len() != FEATURE_NAMES.len() {
            return Err(Error::ModelScoring(format!(
                "Model artifact has {} coefficients, expected {}",
                file.coefficients.len(),
                FEATURE_NAMES.len()
            )));
        }
        if !file.intercept.is_finite() {
            return Err(Error::ModelScoring("Model intercept is not finite".to_string()));
        }

        Ok(Self {
            intercept: file.intercept,
            weights,
        })
    }
}

impl SalesModel for LinearSalesModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(Error::ModelScoring(format!(
                "Expected {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        let mut prediction = self.intercept;
        for (weight, value) in self.weights.iter().zip(features) {
            prediction += weight * value;
        }
        if !prediction.is_finite() {
            return Err(Error::ModelScoring(
                "Model produced a non-finite prediction".to_string(),
            ));
        }
        Ok(prediction)
    }
}

type ModelLoader = dyn Fn() -> Result<Arc<dyn SalesModel>> + Send + Sync;

/// Lazy, load-once handle to the sales model
///
/// Cloneable via `Arc` at the state level; all users of one handle share
/// one load.
pub struct ModelHandle {
    loader: Arc<ModelLoader>,
    cell: OnceCell<Arc<dyn SalesModel>>,
}

impl ModelHandle {
    /// Handle that loads the artifact at `path` on first use, falling back
    /// to the compiled-in model when the file is absent
    pub fn from_artifact(path: PathBuf) -> Self {
        Self::from_loader(move || {
            let json = if path.exists() {
                info!("Loading model artifact from {}", path.display());
                std::fs::read_to_string(&path).map_err(|e| {
                    Error::ModelScoring(format!(
                        "Cannot read model artifact {}: {}",
                        path.display(),
                        e
                    ))
                })?
            } else {
                warn!("No model artifact at {}, using built-in", path.display());
                DEFAULT_MODEL_JSON.to_string()
            };
            let model = LinearSalesModel::from_json(&json)?;
            Ok(Arc::new(model) as Arc<dyn SalesModel>)
        })
    }

    /// Handle backed by an arbitrary loader
    pub fn from_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SalesModel>> + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Handle whose model is already resident (skips the lazy load)
    pub fn preloaded(model: Arc<dyn SalesModel>) -> Self {
        let for_loader = Arc::clone(&model);
        Self {
            loader: Arc::new(move || Ok(Arc::clone(&for_loader))),
            cell: OnceCell::new_with(Some(model)),
        }
    }

    /// Whether the model is resident in memory
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the model, loading it first if necessary
    ///
    /// Concurrent callers share a single load. A failed load is not
    /// cached; the next call retries.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn SalesModel>> {
        let model = self
            .cell
            .get_or_try_init(|| {
                let loader = Arc::clone(&self.loader);
                async move {
                    let loaded = tokio::task::spawn_blocking(move || loader())
                        .await
                        .map_err(|e| {
                            Error::ModelScoring(format!("Model load task failed: {}", e))
                        })??;
                    info!("Sales model loaded");
                    Ok::<_, Error>(loaded)
                }
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Score one feature vector, loading the model first if necessary
    pub async fn predict(&self, features: &[f64]) -> Result<f64> {
        let model = self.ensure_loaded().await?;
        model.predict(features)
    }
}
