use crate::catalog::{ListingFilter, SortOrder};
use crate::polish::types::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::polish::PolishConfig;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "estate-concierge", version, about = "Browse listings, ask questions and book visits")]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive chat (default)
    Chat,
    /// List properties with filters and sorting
    Listings(ListingArgs),
    /// Book a visit through the simple form path
    Book {
        #[arg(long)]
        name: String,
        /// Property name or listing id
        #[arg(long)]
        property: String,
        /// Preferred date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show bookings made through the form path
    Bookings,
    /// Show visit requests captured in chat
    Visits,
}

#[derive(Debug, Args)]
pub struct ListingArgs {
    /// Fragment of the property name
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long = "type")]
    pub property_type: Option<String>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    #[arg(long, value_enum, default_value_t = SortOrder::PriceAsc)]
    pub sort: SortOrder,
    /// Print JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

impl From<&ListingArgs> for ListingFilter {
    fn from(args: &ListingArgs) -> Self {
        Self {
            search: args.search.clone(),
            city: args.city.clone(),
            property_type: args.property_type.clone(),
            min_price: args.min_price,
            max_price: args.max_price,
            sort: args.sort,
        }
    }
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Directory holding the CSV files
    #[arg(long, global = true, env = "ESTATE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Property source [default: <data-dir>/properties.csv]
    #[arg(long, global = true)]
    pub properties: Option<PathBuf>,

    /// Visit request log [default: <data-dir>/visits.csv]
    #[arg(long = "visits", global = true)]
    pub visits_log: Option<PathBuf>,

    /// Form booking log [default: <data-dir>/bookings.csv]
    #[arg(long, global = true)]
    pub legacy_bookings: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Credential for the reply rewrite service; rewriting is off without it
    #[arg(long, global = true, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    #[arg(long, global = true, env = "LLM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub llm_endpoint: String,

    #[arg(long, global = true, env = "LLM_MODEL", default_value = DEFAULT_MODEL)]
    pub llm_model: String,

    #[arg(long, global = true, default_value_t = 10)]
    pub llm_timeout_secs: u64,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub properties_path: PathBuf,
    pub visits_path: PathBuf,
    pub legacy_bookings_path: PathBuf,
    pub polish: PolishConfig,
}

impl SettingsArgs {
    pub fn resolve(&self) -> Settings {
        let in_data_dir = |file: &str| self.data_dir.join(file);
        Settings {
            properties_path: self
                .properties
                .clone()
                .unwrap_or_else(|| in_data_dir("properties.csv")),
            visits_path: self.visits_log.clone().unwrap_or_else(|| in_data_dir("visits.csv")),
            legacy_bookings_path: self
                .legacy_bookings
                .clone()
                .unwrap_or_else(|| in_data_dir("bookings.csv")),
            polish: PolishConfig {
                api_key: self.llm_api_key.clone(),
                endpoint: self.llm_endpoint.clone(),
                model: self.llm_model.clone(),
                timeout: Duration::from_secs(self.llm_timeout_secs),
                ..PolishConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_default_under_data_dir() {
        let cli = Cli::try_parse_from(["estate-concierge", "--data-dir", "/srv/estate"]).unwrap();
        let settings = cli.settings.resolve();
        assert_eq!(settings.properties_path, PathBuf::from("/srv/estate/properties.csv"));
        assert_eq!(settings.visits_path, PathBuf::from("/srv/estate/visits.csv"));
        assert_eq!(settings.legacy_bookings_path, PathBuf::from("/srv/estate/bookings.csv"));
        assert_eq!(settings.polish.timeout, Duration::from_secs(10));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_explicit_paths_and_listing_args() {
        let cli = Cli::try_parse_from([
            "estate-concierge",
            "listings",
            "--properties",
            "x.csv",
            "--city",
            "Dubai",
            "--type",
            "Villa",
            "--sort",
            "area-desc",
            "--llm-timeout-secs",
            "3",
        ])
        .unwrap();
        let settings = cli.settings.resolve();
        assert_eq!(settings.properties_path, PathBuf::from("x.csv"));
        assert_eq!(settings.polish.timeout, Duration::from_secs(3));

        match cli.command {
            Some(Command::Listings(args)) => {
                let filter = ListingFilter::from(&args);
                assert_eq!(filter.city.as_deref(), Some("Dubai"));
                assert_eq!(filter.property_type.as_deref(), Some("Villa"));
                assert_eq!(filter.sort, SortOrder::AreaDesc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_book_parses_date() {
        let cli = Cli::try_parse_from([
            "estate-concierge",
            "book",
            "--name",
            "Jane Doe",
            "--property",
            "P003",
            "--date",
            "2026-11-02",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Book { date, .. }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
