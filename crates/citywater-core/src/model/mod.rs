// crates/citywater-core/src/model/mod.rs

pub mod city;
pub mod raw;

pub use city::{
    CityListing, CityModel, ConsumptionPoint, Initiative, RecyclingPoint, Trend, WaterSource,
    WaterUsage,
};
pub use raw::{RawCityRecord, RawConsumptionRow, RawInitiativeRow, RawRecyclingRow, RawSourceRow};
