// crates/citywater-core/src/lib.rs

//! # citywater-core
//!
//! Data-access layer for municipal water-usage statistics.
//!
//! The crate fetches rows from a remote tabular store (a PostgREST-style
//! endpoint), reshapes them into a normalized display model, and falls back
//! to a fixed built-in dataset whenever the store is unreachable or has no
//! match. The public entry point is [`CityResolver`]: its lookups never
//! fail from the caller's point of view, they degrade to defaults instead.

pub mod defaults;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod store;
pub mod text;
pub mod transform;

// Re-exports
pub use crate::defaults::DefaultDataset;
pub use crate::error::{Result, StoreError};
pub use crate::model::{
    CityListing, CityModel, ConsumptionPoint, Initiative, RawCityRecord, RecyclingPoint, Trend,
    WaterSource, WaterUsage,
};
pub use crate::normalize::TrendRules;
pub use crate::resolver::CityResolver;
pub use crate::store::memory::MemoryStore;
#[cfg(feature = "rest")]
pub use crate::store::rest::{RestConfig, RestStore};
pub use crate::store::CityStore;
