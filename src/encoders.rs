//! Categorical label encoders
//!
//! Maps categorical field values (city, product family, store type) to the
//! integer codes the trained model was fitted on. The artifact
//! (`encoders.json`) stores one ordered class list per field; a value's code
//! is its position in that list.
//!
//! Encoding comes in two strengths. [`LabelEncoder::encode`] returns `None`
//! for unknown values so callers can reject bad input. [`LabelEncoder::encode_or_first`]
//! never fails: unknown values are encoded as the first class, logged at
//! warn level. City uses the forgiving form (every dropdown city must
//! produce a forecast even when the training data never saw it); family
//! uses the strict form.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Compiled-in encoder artifact, used when the root folder has none
pub(crate) const DEFAULT_ENCODERS_JSON: &str = include_str!("defaults/encoders.json");

/// One fitted label encoder: ordered classes, code = position
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    name: String,
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Build an encoder from its field name and ordered class list
    pub fn new(name: impl Into<String>, classes: Vec<String>) -> Result<Self> {
        let name = name.into();
        if classes.is_empty() {
            return Err(Error::Config(format!(
                "Encoder '{}' has an empty class list",
                name
            )));
        }
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            // first occurrence wins if the artifact repeats a class
            index.entry(class.clone()).or_insert(i);
        }
        Ok(Self {
            name,
            classes,
            index,
        })
    }

    /// Encode a value, or `None` if it is not a known class
    pub fn encode(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Encode a value, substituting the first class when unknown
    pub fn encode_or_first(&self, value: &str) -> usize {
        match self.index.get(value) {
            Some(&code) => code,
            None => {
                warn!(
                    "Unknown {} '{}', encoding as '{}'",
                    self.name,
                    value,
                    self.first_label()
                );
                0
            }
        }
    }

    /// First class in the defined ordering (the fallback target)
    pub fn first_label(&self) -> &str {
        &self.classes[0]
    }

    /// Ordered class list
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// On-disk shape of `encoders.json`
#[derive(Debug, Deserialize)]
struct EncoderFile {
    city: Vec<String>,
    family: Vec<String>,
    #[serde(rename = "type")]
    store_type: Vec<String>,
}

/// The three fitted encoders the feature vector needs
#[derive(Debug, Clone)]
pub struct EncoderSet {
    pub city: LabelEncoder,
    pub family: LabelEncoder,
    pub store_type: LabelEncoder,
}

impl EncoderSet {
    /// Parse an encoder artifact from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: EncoderFile = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid encoder artifact: {}", e)))?;
        Ok(Self {
            city: LabelEncoder::new("city", file.city)?,
            family: LabelEncoder::new("family", file.family)?,
            store_type: LabelEncoder::new("type", file.store_type)?,
        })
    }

    /// Load the artifact at `path`, or the compiled-in default if the file
    /// is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let json = std::fs::read_to_string(path)?;
            let set = Self::from_json(&json)?;
            info!(
                "Loaded encoders from {} ({} cities, {} families)",
                path.display(),
                set.city.classes().len(),
                set.family.classes().len()
            );
            Ok(set)
        } else {
            warn!("No encoder artifact at {}, using built-in", path.display());
            Self::from_json(DEFAULT_ENCODERS_JSON)
        }
    }
}
