// crates/citywater-core/src/model/city.rs

use serde::{Deserialize, Serialize};

/// Qualitative direction of a city's water consumption.
///
/// Always set on a transformed model, never absent. Derived from the
/// store's categorical `tier` label via
/// [`TrendRules`](crate::normalize::TrendRules).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// The consumption block of a [`CityModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterUsage {
    /// Gallons per person per day.
    pub per_capita: f64,
    /// Million gallons per day, city-wide.
    pub total_daily: f64,
    /// Display label for the unit ("gallons").
    pub unit: String,
    pub trend: Trend,
}

/// One supply source and its share of the city's intake.
///
/// Shares conceptually sum to 100 but this is not enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterSource {
    pub source: String,
    pub percentage: f64,
}

/// One year of total consumption (million gallons per day).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionPoint {
    pub year: i32,
    pub value: f64,
}

/// One year of the recycling rate (percent).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecyclingPoint {
    pub year: i32,
    pub percentage: f64,
}

/// A named conservation or infrastructure initiative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub name: String,
    pub description: String,
    pub year: i32,
    pub impact: String,
}

/// The normalized display model handed to the UI layer.
///
/// Constructed fresh on every resolution and immutable afterwards; nothing
/// in this crate mutates a model once it has been returned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityModel {
    /// Slug identifier (lowercase, underscore-joined), or the store's own
    /// id when it assigned one.
    pub id: String,
    pub name: String,
    pub country: String,
    /// Millions of inhabitants, rounded to 2 decimals. Always finite and
    /// positive; unparseable source text falls back to 1.0.
    pub population: f64,
    pub water_usage: WaterUsage,
    pub water_sources: Vec<WaterSource>,
    /// Five yearly points when synthesized, store length when fetched.
    pub water_consumption: Vec<ConsumptionPoint>,
    pub water_recycling: Vec<RecyclingPoint>,
    /// 0–100.
    pub sustainability_score: f64,
    /// Never empty; a fixed default list stands in for an absent field.
    pub challenges: Vec<String>,
    pub initiatives: Vec<Initiative>,
}

/// Lightweight projection used by city pickers: id + name + country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityListing {
    pub id: String,
    pub name: String,
    pub country: String,
}
