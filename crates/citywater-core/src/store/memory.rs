// crates/citywater-core/src/store/memory.rs

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::model::{
    RawCityRecord, RawConsumptionRow, RawInitiativeRow, RawRecyclingRow, RawSourceRow,
};
use crate::store::CityStore;
use crate::text::{equals_folded, fold_key};

/// In-memory [`CityStore`] over a plain row list.
///
/// Used by tests and by the CLI's offline mode. Matching semantics mirror
/// the REST backend: exact id equality, folded name equality, folded
/// substring containment. `unreachable()` builds a store whose every call
/// fails, for exercising the resolver's degradation path.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Vec<RawCityRecord>,
    consumption: HashMap<String, Vec<RawConsumptionRow>>,
    recycling: HashMap<String, Vec<RawRecyclingRow>>,
    sources: HashMap<String, Vec<RawSourceRow>>,
    initiatives: HashMap<String, Vec<RawInitiativeRow>>,
    unreachable: bool,
}

impl MemoryStore {
    pub fn new(rows: Vec<RawCityRecord>) -> Self {
        MemoryStore { rows, ..Default::default() }
    }

    /// A store with no rows at all (every lookup is a clean miss).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store where every call returns an error, simulating an endpoint
    /// that cannot be reached.
    pub fn unreachable() -> Self {
        MemoryStore { unreachable: true, ..Default::default() }
    }

    pub fn with_consumption(mut self, id: &str, rows: Vec<RawConsumptionRow>) -> Self {
        self.consumption.insert(id.to_string(), rows);
        self
    }

    pub fn with_recycling(mut self, id: &str, rows: Vec<RawRecyclingRow>) -> Self {
        self.recycling.insert(id.to_string(), rows);
        self
    }

    pub fn with_sources(mut self, id: &str, rows: Vec<RawSourceRow>) -> Self {
        self.sources.insert(id.to_string(), rows);
        self
    }

    pub fn with_initiatives(mut self, id: &str, rows: Vec<RawInitiativeRow>) -> Self {
        self.initiatives.insert(id.to_string(), rows);
        self
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            Err(StoreError::Rejected("memory store marked unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl CityStore for MemoryStore {
    fn fetch_by_id(&self, id: &str) -> Result<Option<RawCityRecord>> {
        self.check_reachable()?;
        Ok(self
            .rows
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .cloned())
    }

    fn fetch_by_name(&self, name: &str) -> Result<Option<RawCityRecord>> {
        self.check_reachable()?;
        Ok(self
            .rows
            .iter()
            .find(|r| equals_folded(&r.city_name, name))
            .cloned())
    }

    fn fetch_by_name_contains(&self, fragment: &str) -> Result<Option<RawCityRecord>> {
        self.check_reachable()?;
        let q = fold_key(fragment);
        if q.is_empty() {
            return Ok(None);
        }
        Ok(self
            .rows
            .iter()
            .find(|r| fold_key(&r.city_name).contains(&q))
            .cloned())
    }

    fn list_rows(&self) -> Result<Vec<RawCityRecord>> {
        self.check_reachable()?;
        Ok(self.rows.clone())
    }

    fn consumption_for(&self, id: &str) -> Result<Vec<RawConsumptionRow>> {
        self.check_reachable()?;
        let mut rows = self.consumption.get(id).cloned().unwrap_or_default();
        rows.sort_by_key(|r| r.year);
        Ok(rows)
    }

    fn recycling_for(&self, id: &str) -> Result<Vec<RawRecyclingRow>> {
        self.check_reachable()?;
        let mut rows = self.recycling.get(id).cloned().unwrap_or_default();
        rows.sort_by_key(|r| r.year);
        Ok(rows)
    }

    fn sources_for(&self, id: &str) -> Result<Vec<RawSourceRow>> {
        self.check_reachable()?;
        Ok(self.sources.get(id).cloned().unwrap_or_default())
    }

    fn initiatives_for(&self, id: &str) -> Result<Vec<RawInitiativeRow>> {
        self.check_reachable()?;
        Ok(self.initiatives.get(id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> RawCityRecord {
        RawCityRecord {
            id: Some(id.to_string()),
            city_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn matches_names_case_and_accent_insensitively() {
        let store = MemoryStore::new(vec![row("zurich", "Zürich")]);
        assert!(store.fetch_by_name("ZURICH").unwrap().is_some());
        assert!(store.fetch_by_name_contains("zur").unwrap().is_some());
        assert!(store.fetch_by_name("Geneva").unwrap().is_none());
    }

    #[test]
    fn empty_fragment_never_matches() {
        let store = MemoryStore::new(vec![row("oslo", "Oslo")]);
        assert!(store.fetch_by_name_contains("").unwrap().is_none());
    }

    #[test]
    fn unreachable_store_errors_on_every_call() {
        let store = MemoryStore::unreachable();
        assert!(store.list_rows().is_err());
        assert!(store.fetch_by_id("x").is_err());
    }
}
