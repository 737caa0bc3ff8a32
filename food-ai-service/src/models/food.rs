use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-serving nutrient values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Entry of the food metadata table, keyed by class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(flatten)]
    pub nutrients: Nutrients,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub substitute: Option<String>,
}

/// Input of the risk advisor.
///
/// Ingredient names are trimmed and lowercased on construction, so lookups
/// are case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodProfile {
    ingredients: BTreeSet<String>,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl FoodProfile {
    pub fn new<I, S>(ingredients: I, nutrients: Nutrients) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ingredients: ingredients
                .into_iter()
                .map(|i| i.as_ref().trim().to_lowercase())
                .filter(|i| !i.is_empty())
                .collect(),
            calories: nutrients.calories,
            carbs: nutrients.carbs,
            protein: nutrients.protein,
            fat: nutrients.fat,
        }
    }

    /// Exact membership test on the normalized ingredient name.
    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.contains(&name.trim().to_lowercase())
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(String::as_str)
    }
}

impl From<&FoodRecord> for FoodProfile {
    fn from(record: &FoodRecord) -> Self {
        FoodProfile::new(&record.ingredients, record.nutrients)
    }
}
