use clap::{Parser, Subcommand};

/// CLI arguments for citywater
#[derive(Debug, Parser)]
#[command(
    name = "citywater",
    version,
    about = "CLI for querying municipal water-usage statistics"
)]
pub struct CliArgs {
    /// Base URL of the REST store (default: $CITYWATER_URL)
    #[arg(short = 'u', long = "url", global = true)]
    pub url: Option<String>,

    /// API key for the REST store (default: $CITYWATER_KEY)
    #[arg(short = 'k', long = "key", global = true)]
    pub key: Option<String>,

    /// Skip the remote store entirely and use the built-in dataset
    #[arg(long = "offline", global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all known cities (store rows merged with defaults)
    Cities,

    /// Resolve one city to its full display model
    City {
        /// City identifier, e.g. new_york_city
        id: String,

        /// Print the model as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}
