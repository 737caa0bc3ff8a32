//! Static food metadata table, loaded once at startup.

use crate::models::FoodRecord;
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    records: BTreeMap<String, FoodRecord>,
}

impl FoodCatalog {
    /// Load the table from a JSON object of `class name -> record`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read food metadata from {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            foods = catalog.len(),
            "Loaded food metadata"
        );
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let records: BTreeMap<String, FoodRecord> = serde_json::from_str(json).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid food metadata: {}", e))
        })?;
        Ok(Self { records })
    }

    pub fn get(&self, name: &str) -> Option<&FoodRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FoodRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }
}

impl FromIterator<(String, FoodRecord)> for FoodCatalog {
    fn from_iter<T: IntoIterator<Item = (String, FoodRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
