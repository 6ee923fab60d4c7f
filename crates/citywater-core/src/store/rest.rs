// crates/citywater-core/src/store/rest.rs

//! PostgREST-style HTTP backend.
//!
//! The store is consumed as a generic queryable table: equality filters,
//! case-insensitive pattern filters, limits, and ordering, all expressed as
//! query parameters. Rows decode through [`serde_json`] into the raw
//! record types; the secondary tables are optional, and a missing table is
//! reported by the endpoint as an error, which callers upstream treat the
//! same as "no rows".

use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::model::{
    RawCityRecord, RawConsumptionRow, RawInitiativeRow, RawRecyclingRow, RawSourceRow,
};
use crate::store::CityStore;

/// Environment variable naming the endpoint base URL.
pub const ENV_URL: &str = "CITYWATER_URL";
/// Environment variable holding the API key.
pub const ENV_KEY: &str = "CITYWATER_KEY";

const PRIMARY_TABLE: &str = "CityWaterUsage";

/// Connection settings for a [`RestStore`].
#[derive(Clone, Debug)]
pub struct RestConfig {
    /// Base URL of the REST endpoint, without a trailing slash.
    pub base_url: String,
    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        RestConfig { base_url, api_key: api_key.into() }
    }

    /// Read `CITYWATER_URL` / `CITYWATER_KEY` from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(ENV_URL)
            .map_err(|_| StoreError::NotConfigured(format!("{ENV_URL} is not set")))?;
        let api_key = std::env::var(ENV_KEY)
            .map_err(|_| StoreError::NotConfigured(format!("{ENV_KEY} is not set")))?;
        Ok(RestConfig::new(base_url, api_key))
    }
}

/// [`CityStore`] backed by a PostgREST-style HTTP endpoint.
pub struct RestStore {
    config: RestConfig,
    client: reqwest::blocking::Client,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Self {
        RestStore { config, client: reqwest::blocking::Client::new() }
    }

    /// Convenience constructor from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(RestConfig::from_env()?))
    }

    /// Run one filtered select against `table` and decode the row list.
    fn select<T: DeserializeOwned>(&self, table: &str, params: &[(&str, &str)]) -> Result<Vec<T>> {
        let url = format!("{}/rest/v1/{}", self.config.base_url, table);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .query(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::Rejected(format!("{table}: {status}: {body}")));
        }

        let rows = response.json::<Vec<T>>()?;
        Ok(rows)
    }

    /// Filtered single-row select on the primary table.
    fn select_one(&self, params: &[(&str, &str)]) -> Result<Option<RawCityRecord>> {
        let mut with_limit = params.to_vec();
        with_limit.push(("select", "*"));
        with_limit.push(("limit", "1"));
        let rows: Vec<RawCityRecord> = self.select(PRIMARY_TABLE, &with_limit)?;
        Ok(rows.into_iter().next())
    }

    /// Secondary-table select keyed by city id, optionally year-ordered.
    fn select_secondary<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
        order_by_year: bool,
    ) -> Result<Vec<T>> {
        let filter = format!("eq.{id}");
        let mut params = vec![("select", "*"), ("city_id", filter.as_str())];
        if order_by_year {
            params.push(("order", "year.asc"));
        }
        self.select(table, &params)
    }
}

impl CityStore for RestStore {
    fn fetch_by_id(&self, id: &str) -> Result<Option<RawCityRecord>> {
        let filter = format!("eq.{id}");
        self.select_one(&[("id", filter.as_str())])
    }

    fn fetch_by_name(&self, name: &str) -> Result<Option<RawCityRecord>> {
        // ilike without wildcards = case-insensitive equality.
        let filter = format!("ilike.{name}");
        self.select_one(&[("city_name", filter.as_str())])
    }

    fn fetch_by_name_contains(&self, fragment: &str) -> Result<Option<RawCityRecord>> {
        let filter = format!("ilike.*{fragment}*");
        self.select_one(&[("city_name", filter.as_str())])
    }

    fn list_rows(&self) -> Result<Vec<RawCityRecord>> {
        self.select(PRIMARY_TABLE, &[("select", "id,city_name,country")])
    }

    fn consumption_for(&self, id: &str) -> Result<Vec<RawConsumptionRow>> {
        self.select_secondary("CityWaterConsumption", id, true)
    }

    fn recycling_for(&self, id: &str) -> Result<Vec<RawRecyclingRow>> {
        self.select_secondary("CityWaterRecycling", id, true)
    }

    fn sources_for(&self, id: &str) -> Result<Vec<RawSourceRow>> {
        self.select_secondary("CityWaterSources", id, false)
    }

    fn initiatives_for(&self, id: &str) -> Result<Vec<RawInitiativeRow>> {
        self.select_secondary("CityInitiatives", id, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slashes() {
        let cfg = RestConfig::new("https://db.example.com//", "k");
        assert_eq!(cfg.base_url, "https://db.example.com");
    }
}
