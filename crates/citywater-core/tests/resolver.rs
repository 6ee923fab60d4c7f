//! Resolver integration tests: the lookup cascade against an in-memory
//! store, including the degraded paths (empty table, unreachable store).

use citywater_core::{
    CityResolver, DefaultDataset, MemoryStore, RawCityRecord, TrendRules,
};

fn record(id: Option<&str>, name: &str) -> RawCityRecord {
    RawCityRecord {
        id: id.map(str::to_string),
        city_name: name.to_string(),
        ..Default::default()
    }
}

fn resolver(store: MemoryStore) -> CityResolver<MemoryStore> {
    CityResolver::new(store, DefaultDataset::builtin().clone(), TrendRules::default())
}

#[test]
fn exact_id_match_wins() {
    let store = MemoryStore::new(vec![
        record(Some("berlin"), "Berlin"),
        record(Some("munich"), "Munich"),
    ]);
    let city = resolver(store).city_by_id("munich");
    assert_eq!(city.name, "Munich");
    assert_eq!(city.id, "munich");
}

#[test]
fn falls_through_to_name_match_when_id_misses() {
    // Rows carry store ids that do not line up with slugs.
    let store = MemoryStore::new(vec![record(Some("row-9"), "Cape Town")]);
    let city = resolver(store).city_by_id("cape_town");
    assert_eq!(city.name, "Cape Town");
    // The transformer keeps the store's own id once a row is found.
    assert_eq!(city.id, "row-9");
}

#[test]
fn alias_form_matches_short_store_name() {
    let store = MemoryStore::new(vec![record(None, "New York")]);
    let city = resolver(store).city_by_id("new_york_city");
    assert_eq!(city.name, "New York");
}

#[test]
fn partial_match_on_first_word() {
    let store = MemoryStore::new(vec![record(None, "San Francisco Bay Area")]);
    // "san_francisco" reconstructs to "San Francisco"; no exact name match,
    // but the first word is contained.
    let city = resolver(store).city_by_id("san_francisco");
    assert_eq!(city.name, "San Francisco Bay Area");
}

#[test]
fn empty_store_falls_back_to_builtin_entry() {
    let city = resolver(MemoryStore::empty()).city_by_id("london");
    assert_eq!(city.name, "London");
    assert_eq!(city.country, "UK");
    assert_eq!(city.population, 8.9);
}

#[test]
fn unreachable_store_falls_back_to_builtin_entry() {
    let city = resolver(MemoryStore::unreachable()).city_by_id("london");
    assert_eq!(city.name, "London");
    assert_eq!(city.country, "UK");
}

#[test]
fn unknown_identifier_yields_generic_model() {
    let city = resolver(MemoryStore::empty()).city_by_id("lake_city");
    assert_eq!(city.id, "lake_city");
    assert_eq!(city.name, "Lake City");
    assert!(!city.challenges.is_empty());
    assert_eq!(city.water_consumption.len(), 5);
}

#[test]
fn resolution_never_panics_on_hostile_input() {
    let resolver = resolver(MemoryStore::empty());
    for id in ["", "   ", "___", "北京", "zürich", "a_b_c_d_e_f", "\u{0}"] {
        let city = resolver.city_by_id(id);
        assert_eq!(city.id, id);
        assert!(!city.challenges.is_empty());
    }
}

#[test]
fn listing_merges_store_rows_with_defaults() {
    let store = MemoryStore::new(vec![
        record(Some("berlin"), "Berlin"),
        // Same name as a default entry, different case: must not duplicate.
        record(Some("row-1"), "LONDON"),
    ]);
    let listings = resolver(store).cities();

    assert!(listings.iter().any(|c| c.name == "Berlin"));
    let londons = listings
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case("london"))
        .count();
    assert_eq!(londons, 1);
    // Defaults not present in the store are appended.
    assert!(listings.iter().any(|c| c.id == "tokyo"));
}

#[test]
fn listing_is_never_empty() {
    assert_eq!(resolver(MemoryStore::empty()).cities().len(), 5);
    assert_eq!(resolver(MemoryStore::unreachable()).cities().len(), 5);
}

#[test]
fn listing_derives_slug_when_store_has_no_id() {
    let store = MemoryStore::new(vec![record(None, "Buenos Aires")]);
    let listings = resolver(store).cities();
    let entry = listings.iter().find(|c| c.name == "Buenos Aires").unwrap();
    assert_eq!(entry.id, "buenos_aires");
    assert_eq!(entry.country, "Unknown");
}

#[test]
fn resolved_rows_carry_transformed_fields() {
    let mut row = record(None, "Valencia");
    row.population = Some("1,578,000".to_string());
    row.tier = Some("efficient".to_string());
    row.key_challenges = Some("Drought;Tourism demand".to_string());

    let city = resolver(MemoryStore::new(vec![row])).city_by_id("valencia");
    assert_eq!(city.population, 1.58);
    assert_eq!(city.challenges, vec!["Drought", "Tourism demand"]);
    assert_eq!(
        city.water_usage.trend,
        citywater_core::Trend::Decreasing
    );
}
