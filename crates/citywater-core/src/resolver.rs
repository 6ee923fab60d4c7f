// crates/citywater-core/src/resolver.rs

//! City resolution: the lookup cascade.
//!
//! A resolution walks an ordered list of lookup stages against the store
//! and transforms the first row found. A store error at any stage is
//! logged and treated exactly like "no match", so from the caller's point
//! of view resolution always succeeds; the injected [`DefaultDataset`]
//! covers the terminal miss.

use tracing::{debug, warn};

use crate::defaults::DefaultDataset;
use crate::error::Result;
use crate::model::{CityListing, CityModel, RawCityRecord};
use crate::normalize::TrendRules;
use crate::store::CityStore;
use crate::text::{equals_folded, fold_key, name_from_slug, slug_from_name};
use crate::transform::Transformer;

/// Known alternate name forms, tried alongside the slug-reconstructed name.
/// Folded lookup key on the left, candidate to query on the right.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("new york city", "New York"),
    ("new york", "New York City"),
];

/// Ordered lookup stages. The resolver advances on a miss or a store
/// error, and stops at the first hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LookupStage {
    /// Store-assigned primary id equals the identifier verbatim.
    ExactId,
    /// Case-insensitive name equality on the slug-reconstructed name,
    /// alias forms included.
    ExactName,
    /// Substring match on the first word of the candidate name.
    PartialName,
}

const CASCADE: [LookupStage; 3] = [
    LookupStage::ExactId,
    LookupStage::ExactName,
    LookupStage::PartialName,
];

/// Resolves city identifiers to display models.
///
/// Construct with a store, a fallback dataset, and trend rules; all three
/// are explicit values so tests can substitute any of them.
///
/// ```rust
/// use citywater_core::{CityResolver, DefaultDataset, MemoryStore, TrendRules};
///
/// let resolver = CityResolver::new(
///     MemoryStore::empty(),
///     DefaultDataset::builtin().clone(),
///     TrendRules::default(),
/// );
/// let city = resolver.city_by_id("london");
/// assert_eq!(city.country, "UK");
/// ```
pub struct CityResolver<S: CityStore> {
    store: S,
    defaults: DefaultDataset,
    rules: TrendRules,
}

impl<S: CityStore> CityResolver<S> {
    pub fn new(store: S, defaults: DefaultDataset, rules: TrendRules) -> Self {
        CityResolver { store, defaults, rules }
    }

    /// Resolver over the built-in five-city fallback set and default
    /// trend rules.
    pub fn with_builtin_defaults(store: S) -> Self {
        Self::new(store, DefaultDataset::builtin().clone(), TrendRules::default())
    }

    /// Resolve an identifier to a complete display model.
    ///
    /// Never fails: the cascade degrades to the fallback dataset when the
    /// store is unreachable or has no match.
    pub fn city_by_id(&self, id: &str) -> CityModel {
        for stage in CASCADE {
            match self.run_stage(stage, id) {
                Ok(Some(raw)) => {
                    debug!(city = id, ?stage, "lookup hit");
                    return Transformer::new(&self.store, &self.rules).transform(&raw);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(city = id, ?stage, error = %e, "store error, advancing cascade");
                }
            }
        }

        debug!(city = id, "cascade exhausted, using fallback dataset");
        self.defaults.city_for(id)
    }

    /// The picker projection: store rows merged with the fallback set.
    ///
    /// Defaults whose names are not already present (case-insensitive) are
    /// appended, so the list is store-union-defaults. A store error or an
    /// empty table yields the fallback set alone. Never empty.
    pub fn cities(&self) -> Vec<CityListing> {
        let rows = match self.store.list_rows() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "city listing unavailable, using fallback dataset");
                return self.defaults.listings();
            }
        };
        if rows.is_empty() {
            return self.defaults.listings();
        }

        let mut listings: Vec<CityListing> = rows
            .iter()
            .map(|r| CityListing {
                id: r
                    .id
                    .clone()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| slug_from_name(&r.city_name)),
                name: r.city_name.clone(),
                country: r
                    .country
                    .clone()
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect();

        for fallback in self.defaults.listings() {
            let known = listings
                .iter()
                .any(|l| equals_folded(&l.name, &fallback.name));
            if !known {
                listings.push(fallback);
            }
        }
        listings
    }

    fn run_stage(&self, stage: LookupStage, id: &str) -> Result<Option<RawCityRecord>> {
        match stage {
            LookupStage::ExactId => self.store.fetch_by_id(id),
            LookupStage::ExactName => {
                for candidate in name_candidates(id) {
                    if let Some(row) = self.store.fetch_by_name(&candidate)? {
                        return Ok(Some(row));
                    }
                }
                Ok(None)
            }
            LookupStage::PartialName => {
                let name = name_from_slug(id);
                match name.split_whitespace().next() {
                    Some(first_word) => self.store.fetch_by_name_contains(first_word),
                    None => Ok(None),
                }
            }
        }
    }
}

/// Candidate display names for an identifier: the slug-reconstructed name
/// first, then any known alias form.
fn name_candidates(id: &str) -> Vec<String> {
    let name = name_from_slug(id);
    if name.is_empty() {
        return Vec::new();
    }
    let key = fold_key(&name);
    let mut candidates = vec![name];
    for (alias_key, alias_name) in NAME_ALIASES {
        if key == *alias_key {
            candidates.push(alias_name.to_string());
        }
    }
    candidates
}
