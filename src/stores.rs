//! Store reference directory
//!
//! Maps a city to the profile of its representative store (store number,
//! type letter, cluster). The reference data lives in `stores_nigeria.csv`
//! and covers every market offered by the form; when a city has several
//! stores the first row wins, matching how the model's training pipeline
//! picked one store per city. Cities with no row at all get a fixed
//! fallback profile so a forecast is always produced.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Compiled-in store reference CSV, used when the root folder has none
pub(crate) const DEFAULT_STORES_CSV: &str = include_str!("defaults/stores_nigeria.csv");

/// One store's reference profile
#[derive(Debug, Clone, Deserialize)]
pub struct StoreProfile {
    pub store_nbr: u32,
    pub city: String,
    #[serde(rename = "type")]
    pub store_type: String,
    pub cluster: u32,
}

impl StoreProfile {
    /// Profile substituted for cities absent from the reference data
    fn fallback(city: &str) -> Self {
        Self {
            store_nbr: 1,
            city: city.to_string(),
            store_type: "D".to_string(),
            cluster: 1,
        }
    }
}

/// All store rows, in file order, plus the sorted distinct city list
#[derive(Debug, Clone)]
pub struct StoreDirectory {
    stores: Vec<StoreProfile>,
    cities: Vec<String>,
}

impl StoreDirectory {
    /// Parse store reference data from CSV text
    pub fn from_csv(data: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let mut stores = Vec::new();
        for record in reader.deserialize::<StoreProfile>() {
            let profile =
                record.map_err(|e| Error::Config(format!("Invalid store reference row: {}", e)))?;
            stores.push(profile);
        }
        if stores.is_empty() {
            return Err(Error::Config("Store reference data is empty".to_string()));
        }

        let cities: Vec<String> = stores
            .iter()
            .map(|s| s.city.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self { stores, cities })
    }

    /// Load the CSV at `path`, or the compiled-in default if the file is
    /// absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)?;
            let directory = Self::from_csv(&data)?;
            info!(
                "Loaded {} store rows ({} cities) from {}",
                directory.stores.len(),
                directory.cities.len(),
                path.display()
            );
            Ok(directory)
        } else {
            warn!("No store reference at {}, using built-in", path.display());
            Self::from_csv(DEFAULT_STORES_CSV)
        }
    }

    /// Profile of the first store in `city`, if the city has a store row
    pub fn lookup(&self, city: &str) -> Option<&StoreProfile> {
        self.stores.iter().find(|s| s.city == city)
    }

    /// Profile of the first store in `city`, or the fallback profile when
    /// the city has no store row
    pub fn profile_for(&self, city: &str) -> StoreProfile {
        match self.lookup(city) {
            Some(profile) => profile.clone(),
            None => {
                warn!("No store reference for city '{}', using fallback profile", city);
                StoreProfile::fallback(city)
            }
        }
    }

    /// Sorted distinct city names, the form's dropdown contents
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Number of store rows
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
