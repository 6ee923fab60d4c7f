// crates/citywater-core/src/transform.rs

//! Raw-record to display-model transformation.
//!
//! One store row in, one complete [`CityModel`] out. No failure in any
//! sub-step escapes: unparseable fields take their documented defaults,
//! and a secondary-table error is logged and handled like an absent table.

use tracing::warn;

use crate::defaults::{default_challenges, default_initiatives, default_sources};
use crate::model::{
    CityModel, ConsumptionPoint, Initiative, RawCityRecord, RecyclingPoint, WaterSource,
    WaterUsage,
};
use crate::normalize::{parse_population, TrendRules};
use crate::store::CityStore;
use crate::text::slug_from_name;

/// Canonical numeric defaults for null/zero store fields.
pub const DEFAULT_PER_CAPITA_GPD: f64 = 100.0;
pub const DEFAULT_TOTAL_DAILY_MGD: f64 = 1000.0;
pub const DEFAULT_RECYCLING_RATE: f64 = 15.0;
pub const DEFAULT_SUSTAINABILITY_SCORE: f64 = 70.0;

/// Challenges are split on this delimiter. The store held both `;`- and
/// `,`-delimited data at different times; semicolon is canonical because
/// individual challenge texts may themselves contain commas.
pub const CHALLENGE_DELIMITER: char = ';';

/// Consumption multipliers for the synthesized 5-year window, oldest first.
const CONSUMPTION_CURVE: [f64; 5] = [1.10, 1.05, 1.00, 0.98, 0.95];

/// Offsets from the current recycling rate for the synthesized window,
/// oldest first.
const RECYCLING_OFFSETS: [f64; 5] = [-10.0, -8.0, -5.0, -3.0, 0.0];

/// Per-point floors for the synthesized recycling window, in percent.
const RECYCLING_FLOORS: [f64; 5] = [5.0, 7.0, 9.0, 11.0, 0.0];

/// Builds display models from raw rows, issuing secondary-table reads
/// through the store for genuine historical series.
pub struct Transformer<'a, S: CityStore> {
    store: &'a S,
    rules: &'a TrendRules,
    /// Final year of synthesized series (the four preceding years fill the
    /// rest of the window).
    latest_year: i32,
}

impl<'a, S: CityStore> Transformer<'a, S> {
    pub fn new(store: &'a S, rules: &'a TrendRules) -> Self {
        Transformer { store, rules, latest_year: current_year() }
    }

    /// Pin the synthesized window to end at `year` instead of the wall
    /// clock. Tests use this for stable output.
    pub fn with_latest_year(mut self, year: i32) -> Self {
        self.latest_year = year;
        self
    }

    /// Convert one raw row into a complete model. Never fails.
    pub fn transform(&self, raw: &RawCityRecord) -> CityModel {
        let id = raw
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slug_from_name(&raw.city_name));

        let total_daily = positive_or(raw.daily_water_usage_mgd, DEFAULT_TOTAL_DAILY_MGD);
        let recycling_rate = positive_or(raw.recycling_rate_pct, DEFAULT_RECYCLING_RATE);

        CityModel {
            name: raw.city_name.clone(),
            country: raw
                .country
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            population: parse_population(raw.population.as_deref().unwrap_or("")),
            water_usage: WaterUsage {
                per_capita: positive_or(raw.per_capita_usage_gpd, DEFAULT_PER_CAPITA_GPD),
                total_daily,
                unit: "gallons".to_string(),
                trend: self.rules.derive(raw.tier.as_deref()),
            },
            water_sources: self.sources(&id),
            water_consumption: self.consumption(&id, total_daily),
            water_recycling: self.recycling(&id, recycling_rate),
            sustainability_score: positive_or(
                raw.sustainability_score,
                DEFAULT_SUSTAINABILITY_SCORE,
            ),
            challenges: split_challenges(raw.key_challenges.as_deref()),
            initiatives: self.initiatives(&id),
            id,
        }
    }

    /// Genuine series when the secondary table has rows, synthesized
    /// decline otherwise.
    fn consumption(&self, id: &str, total_daily: f64) -> Vec<ConsumptionPoint> {
        match self.store.consumption_for(id) {
            Ok(rows) if !rows.is_empty() => rows
                .into_iter()
                .map(|r| ConsumptionPoint { year: r.year, value: r.value })
                .collect(),
            Ok(_) => self.synthesize_consumption(total_daily),
            Err(e) => {
                warn!(city = id, error = %e, "consumption history unavailable, synthesizing");
                self.synthesize_consumption(total_daily)
            }
        }
    }

    fn synthesize_consumption(&self, total_daily: f64) -> Vec<ConsumptionPoint> {
        CONSUMPTION_CURVE
            .iter()
            .enumerate()
            .map(|(i, m)| ConsumptionPoint {
                year: self.latest_year - 4 + i as i32,
                value: (total_daily * m).round(),
            })
            .collect()
    }

    fn recycling(&self, id: &str, rate: f64) -> Vec<RecyclingPoint> {
        match self.store.recycling_for(id) {
            Ok(rows) if !rows.is_empty() => rows
                .into_iter()
                .map(|r| RecyclingPoint { year: r.year, percentage: r.percentage })
                .collect(),
            Ok(_) => self.synthesize_recycling(rate),
            Err(e) => {
                warn!(city = id, error = %e, "recycling history unavailable, synthesizing");
                self.synthesize_recycling(rate)
            }
        }
    }

    /// Absolute offsets below the current rate, each point held to its
    /// floor, then clamped to a running maximum so the series never
    /// decreases even for rates below the floors. The final point is the
    /// current rate whenever the rate clears the floors.
    fn synthesize_recycling(&self, rate: f64) -> Vec<RecyclingPoint> {
        let mut prev = 0.0_f64;
        RECYCLING_OFFSETS
            .iter()
            .zip(RECYCLING_FLOORS)
            .enumerate()
            .map(|(i, (offset, floor))| {
                let mut pct = round1((rate + offset).max(floor));
                pct = pct.max(prev);
                prev = pct;
                RecyclingPoint { year: self.latest_year - 4 + i as i32, percentage: pct }
            })
            .collect()
    }

    fn sources(&self, id: &str) -> Vec<WaterSource> {
        match self.store.sources_for(id) {
            Ok(rows) if !rows.is_empty() => rows
                .into_iter()
                .map(|r| WaterSource { source: r.source, percentage: r.percentage })
                .collect(),
            Ok(_) => default_sources(),
            Err(e) => {
                warn!(city = id, error = %e, "sources unavailable, using defaults");
                default_sources()
            }
        }
    }

    fn initiatives(&self, id: &str) -> Vec<Initiative> {
        match self.store.initiatives_for(id) {
            Ok(rows) if !rows.is_empty() => rows
                .into_iter()
                .map(|r| Initiative {
                    name: r.name,
                    description: r.description.unwrap_or_default(),
                    year: r.year.unwrap_or(self.latest_year),
                    impact: r.impact.unwrap_or_default(),
                })
                .collect(),
            Ok(_) => default_initiatives(),
            Err(e) => {
                warn!(city = id, error = %e, "initiatives unavailable, using defaults");
                default_initiatives()
            }
        }
    }
}

/// Split the delimited challenges field, trimming entries and dropping
/// blanks. An absent or effectively empty field yields the fixed default
/// list, so the result is never empty.
fn split_challenges(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or("")
        .split(CHALLENGE_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if parsed.is_empty() {
        default_challenges()
    } else {
        parsed
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawConsumptionRow, Trend};
    use crate::store::memory::MemoryStore;

    fn raw(name: &str) -> RawCityRecord {
        RawCityRecord { city_name: name.to_string(), ..Default::default() }
    }

    fn transform_with(store: &MemoryStore, raw: &RawCityRecord) -> CityModel {
        let rules = TrendRules::default();
        Transformer::new(store, &rules)
            .with_latest_year(2022)
            .transform(raw)
    }

    #[test]
    fn sparse_row_gets_all_defaults() {
        let store = MemoryStore::empty();
        let city = transform_with(&store, &raw("Lagos"));

        assert_eq!(city.id, "lagos");
        assert_eq!(city.country, "Unknown");
        assert_eq!(city.population, 1.0);
        assert_eq!(city.water_usage.per_capita, 100.0);
        assert_eq!(city.water_usage.total_daily, 1000.0);
        assert_eq!(city.water_usage.trend, Trend::Stable);
        assert_eq!(city.sustainability_score, 70.0);
        assert_eq!(city.challenges.len(), 3);
        assert_eq!(city.initiatives.len(), 2);
    }

    #[test]
    fn store_id_wins_over_derived_slug() {
        let store = MemoryStore::empty();
        let mut record = raw("New York City");
        record.id = Some("row-17".to_string());
        assert_eq!(transform_with(&store, &record).id, "row-17");

        record.id = None;
        assert_eq!(transform_with(&store, &record).id, "new_york_city");
    }

    #[test]
    fn synthesized_consumption_follows_decay_curve() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.daily_water_usage_mgd = Some(1000.0);

        let series = transform_with(&store, &record).water_consumption;
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(years, vec![2018, 2019, 2020, 2021, 2022]);
        assert_eq!(values, vec![1100.0, 1050.0, 1000.0, 980.0, 950.0]);
    }

    #[test]
    fn genuine_consumption_series_is_used_verbatim() {
        let store = MemoryStore::empty().with_consumption(
            "madrid",
            vec![
                RawConsumptionRow { year: 2021, value: 640.0 },
                RawConsumptionRow { year: 2020, value: 650.0 },
            ],
        );
        let series = transform_with(&store, &raw("Madrid")).water_consumption;
        assert_eq!(series.len(), 2);
        // Year-ascending regardless of store order.
        assert_eq!(series[0].year, 2020);
        assert_eq!(series[1].value, 640.0);
    }

    #[test]
    fn synthesized_recycling_offsets_from_rate() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.recycling_rate_pct = Some(30.0);

        let series = transform_with(&store, &record).water_recycling;
        let values: Vec<f64> = series.iter().map(|p| p.percentage).collect();
        assert_eq!(values, vec![20.0, 22.0, 25.0, 27.0, 30.0]);
        for pair in series.windows(2) {
            assert!(pair[1].percentage >= pair[0].percentage);
        }
    }

    #[test]
    fn default_rate_reproduces_fixed_series() {
        // rate 15 is the null/zero default.
        let store = MemoryStore::empty();
        let series = transform_with(&store, &raw("Madrid")).water_recycling;
        let values: Vec<f64> = series.iter().map(|p| p.percentage).collect();
        assert_eq!(values, vec![5.0, 7.0, 10.0, 12.0, 15.0]);
    }

    #[test]
    fn recycling_floors_apply_to_tiny_rates() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.recycling_rate_pct = Some(4.0);

        let series = transform_with(&store, &record).water_recycling;
        let values: Vec<f64> = series.iter().map(|p| p.percentage).collect();
        // Per-point floors, with the final point lifted by the running
        // maximum so the series stays non-decreasing.
        assert_eq!(values, vec![5.0, 7.0, 9.0, 11.0, 11.0]);
    }

    #[test]
    fn synthesized_window_ends_at_current_year() {
        use chrono::Datelike;

        let store = MemoryStore::empty();
        let rules = TrendRules::default();
        let city = Transformer::new(&store, &rules).transform(&raw("Madrid"));

        let this_year = chrono::Utc::now().year();
        assert_eq!(city.water_consumption.last().unwrap().year, this_year);
        assert_eq!(city.water_consumption.first().unwrap().year, this_year - 4);
    }

    #[test]
    fn challenges_split_on_semicolon_and_trim() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.key_challenges = Some("Drought; Leaky mains ;; Demand growth".to_string());

        let city = transform_with(&store, &record);
        assert_eq!(
            city.challenges,
            vec!["Drought", "Leaky mains", "Demand growth"]
        );
    }

    #[test]
    fn blank_challenges_fall_back_to_defaults() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.key_challenges = Some(" ; ; ".to_string());
        assert_eq!(transform_with(&store, &record).challenges.len(), 3);
    }

    #[test]
    fn zero_numeric_fields_take_defaults() {
        let store = MemoryStore::empty();
        let mut record = raw("Madrid");
        record.per_capita_usage_gpd = Some(0.0);
        record.daily_water_usage_mgd = Some(0.0);
        record.sustainability_score = Some(0.0);

        let city = transform_with(&store, &record);
        assert_eq!(city.water_usage.per_capita, 100.0);
        assert_eq!(city.water_usage.total_daily, 1000.0);
        assert_eq!(city.sustainability_score, 70.0);
    }

    #[test]
    fn secondary_table_errors_fall_back_to_synthesis() {
        // An unreachable store still transforms: the primary row is already
        // in hand, only the secondary reads fail.
        let store = MemoryStore::unreachable();
        let rules = TrendRules::default();
        let city = Transformer::new(&store, &rules)
            .with_latest_year(2022)
            .transform(&raw("Madrid"));
        assert_eq!(city.water_consumption.len(), 5);
        assert_eq!(city.water_recycling.len(), 5);
        assert!(!city.water_sources.is_empty());
    }
}
