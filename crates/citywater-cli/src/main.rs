//! citywater — Command-line interface for citywater-core
//!
//! This binary resolves municipal water-usage statistics from a remote
//! tabular store, with the library's built-in fallback dataset covering
//! misses and outages. It supports listing all known cities and resolving
//! one city to its full display model.
//!
//! Usage examples
//! --------------
//!
//! - List all cities
//!   $ citywater cities
//!
//! - Resolve a city by identifier
//!   $ citywater city new_york_city
//!   $ citywater city tokyo --json
//!
//! - Work entirely from the built-in dataset
//!   $ citywater --offline city london
//!
//! Store configuration
//! -------------------
//!
//! The REST endpoint and API key come from `--url`/`--key` or from the
//! `CITYWATER_URL`/`CITYWATER_KEY` environment variables. Resolution never
//! fails outright: an unreachable store degrades to the fallback dataset.

mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;

use citywater_core::{
    CityModel, CityResolver, CityStore, MemoryStore, RestConfig, RestStore,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    if args.offline {
        let resolver = CityResolver::with_builtin_defaults(MemoryStore::empty());
        return run(&resolver, args.command);
    }

    let config = match (args.url, args.key) {
        (Some(url), Some(key)) => RestConfig::new(url, key),
        _ => RestConfig::from_env()?,
    };
    let resolver = CityResolver::with_builtin_defaults(RestStore::new(config));
    run(&resolver, args.command)
}

fn run<S: CityStore>(resolver: &CityResolver<S>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Cities => {
            for c in resolver.cities() {
                println!("{} — {}, {}", c.id, c.name, c.country);
            }
        }

        Commands::City { id, json } => {
            let city = resolver.city_by_id(&id);
            if json {
                println!("{}", serde_json::to_string_pretty(&city)?);
            } else {
                print_summary(&city);
            }
        }
    }

    Ok(())
}

fn print_summary(city: &CityModel) {
    println!("City: {} ({})", city.name, city.country);
    println!("Id: {}", city.id);
    println!("Population: {} million", city.population);
    println!(
        "Water usage: {} {}/person/day, {} M{}/day ({:?})",
        city.water_usage.per_capita,
        city.water_usage.unit,
        city.water_usage.total_daily,
        city.water_usage.unit,
        city.water_usage.trend,
    );
    println!("Sustainability score: {}", city.sustainability_score);

    println!("Sources:");
    for s in &city.water_sources {
        println!("  {}: {}%", s.source, s.percentage);
    }

    println!("Consumption (MGD):");
    for p in &city.water_consumption {
        println!("  {}: {}", p.year, p.value);
    }

    println!("Recycling (%):");
    for p in &city.water_recycling {
        println!("  {}: {}", p.year, p.percentage);
    }

    println!("Challenges:");
    for c in &city.challenges {
        println!("  - {c}");
    }

    println!("Initiatives:");
    for i in &city.initiatives {
        println!("  {} ({}): {} — {}", i.name, i.year, i.description, i.impact);
    }
}
