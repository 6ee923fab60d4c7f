// crates/citywater-core/src/store/mod.rs

//! Store backends.
//!
//! [`CityStore`] is the seam between the resolution pipeline and whatever
//! holds the rows. The crate ships two implementations: [`rest::RestStore`]
//! for a PostgREST-style HTTP endpoint and [`memory::MemoryStore`] for
//! in-process data (tests, offline use).

pub mod memory;
#[cfg(feature = "rest")]
pub mod rest;

use crate::error::Result;
use crate::model::{
    RawCityRecord, RawConsumptionRow, RawInitiativeRow, RawRecyclingRow, RawSourceRow,
};

/// A queryable source of city rows.
///
/// Primary-table lookups return at most one row (the store's first match).
/// The secondary-table reads have default implementations returning no
/// rows, matching deployments where those tables simply do not exist; the
/// transformer synthesizes series in that case.
pub trait CityStore {
    /// Row whose store-assigned id equals `id` verbatim.
    fn fetch_by_id(&self, id: &str) -> Result<Option<RawCityRecord>>;

    /// Row whose city name equals `name`, case-insensitively.
    fn fetch_by_name(&self, name: &str) -> Result<Option<RawCityRecord>>;

    /// Row whose city name contains `fragment`, case-insensitively.
    fn fetch_by_name_contains(&self, fragment: &str) -> Result<Option<RawCityRecord>>;

    /// All rows of the primary table.
    fn list_rows(&self) -> Result<Vec<RawCityRecord>>;

    /// Historical consumption for a city, ordered by year ascending.
    fn consumption_for(&self, _id: &str) -> Result<Vec<RawConsumptionRow>> {
        Ok(Vec::new())
    }

    /// Historical recycling rates for a city, ordered by year ascending.
    fn recycling_for(&self, _id: &str) -> Result<Vec<RawRecyclingRow>> {
        Ok(Vec::new())
    }

    /// Supply-source split for a city.
    fn sources_for(&self, _id: &str) -> Result<Vec<RawSourceRow>> {
        Ok(Vec::new())
    }

    /// Initiatives for a city.
    fn initiatives_for(&self, _id: &str) -> Result<Vec<RawInitiativeRow>> {
        Ok(Vec::new())
    }
}
