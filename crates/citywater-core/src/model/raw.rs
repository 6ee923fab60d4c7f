// crates/citywater-core/src/model/raw.rs

//! Store-shaped input rows.
//!
//! These mirror the backing tables column-for-column, including the one
//! column whose name carries a literal unit suffix. Every field except the
//! city name is optional: rows arrive loosely typed and partially filled,
//! and the transformer substitutes documented defaults.

use serde::{Deserialize, Serialize};

/// One row of the `CityWaterUsage` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCityRecord {
    /// Store-assigned id, when the table has one. Older datasets keyed rows
    /// by name only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub city_name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Free-form text: "8.4 million", "8,400,000", sometimes garbage.
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub per_capita_usage_gpd: Option<f64>,
    #[serde(default)]
    pub daily_water_usage_mgd: Option<f64>,
    /// Matches the actual column name in the store.
    #[serde(default, rename = "recycling_rate (%)")]
    pub recycling_rate_pct: Option<f64>,
    #[serde(default)]
    pub sustainability_score: Option<f64>,
    /// Semicolon-delimited list.
    #[serde(default)]
    pub key_challenges: Option<String>,
    /// Categorical label ("efficient", "growing", "tier-1", ...).
    #[serde(default)]
    pub tier: Option<String>,
}

/// One row of the optional historical-consumption table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawConsumptionRow {
    pub year: i32,
    pub value: f64,
}

/// One row of the optional recycling-history table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecyclingRow {
    pub year: i32,
    pub percentage: f64,
}

/// One row of the optional water-sources table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSourceRow {
    pub source: String,
    pub percentage: f64,
}

/// One row of the optional initiatives table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawInitiativeRow {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub impact: Option<String>,
}
