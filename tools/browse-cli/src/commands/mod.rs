//! CLI command implementations.

pub mod config;
pub mod facets;
pub mod list;
pub mod replay;
pub mod session;
pub mod show;

use std::time::Duration;

use anyhow::{Context as _, Result};
use browse_commerce::catalog::ProductCondition;
use browse_commerce::live::{LiveConfig, LiveStats};
use browse_commerce::search::{FilterState, PriceRange, SearchQuery, SortOption};
use browse_observability::SuppressedCounts;
use clap::{Args, Subcommand};

/// Configured live tuning with an optional debounce override.
fn live_config(base: LiveConfig, debounce_ms: Option<u64>) -> LiveConfig {
    match debounce_ms {
        Some(ms) => base.with_debounce(Duration::from_millis(ms)),
        None => base,
    }
}

fn suppressed_counts(stats: LiveStats) -> SuppressedCounts {
    SuppressedCounts {
        keystrokes: stats.keystrokes,
        superseded_keystrokes: stats.superseded_keystrokes,
        duplicate_texts: stats.duplicate_texts,
        duplicate_filters: stats.duplicate_filters,
    }
}

/// Query flags shared by `list` and `facets`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free text matched against name, brand and code.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Location to include (repeatable).
    #[arg(short, long = "location")]
    pub locations: Vec<String>,

    /// Brand to include (repeatable).
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Condition to include, e.g. "like-new" (repeatable).
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min: Option<f64>,

    /// Highest price, inclusive.
    #[arg(long)]
    pub max: Option<f64>,

    /// Sort order: highest-price, lowest-price, rating or reviews.
    #[arg(long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Build the query these flags describe.
    pub fn to_query(&self) -> Result<SearchQuery> {
        let mut filter = FilterState::default();
        filter.selected_locations.extend(self.locations.iter().cloned());
        filter.selected_brands.extend(self.brands.iter().cloned());
        for condition in &self.conditions {
            let condition: ProductCondition = condition
                .parse()
                .with_context(|| format!("Invalid --condition '{}'", condition))?;
            filter.selected_conditions.insert(condition);
        }

        if self.min.is_some() || self.max.is_some() {
            filter.set_price_range(
                self.min.unwrap_or(PriceRange::DEFAULT_MIN),
                self.max.unwrap_or(PriceRange::DEFAULT_MAX),
            );
        }

        if let Some(ref sort) = self.sort {
            let sort: SortOption = sort
                .parse()
                .with_context(|| format!("Invalid --sort '{}'", sort))?;
            filter.set_sort_option(sort);
        }

        Ok(SearchQuery::new()
            .with_text(self.search.clone().unwrap_or_default())
            .with_filter(filter))
    }
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show only the first N products.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product code.
    pub code: String,
}

/// Arguments for the replay command.
#[derive(Args)]
pub struct ReplayArgs {
    /// Interaction script (.toml or .json).
    pub script: String,

    /// Override the configured debounce (milliseconds).
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Skip the metrics summary.
    #[arg(long)]
    pub no_metrics: bool,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Override the configured debounce (milliseconds).
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Show only the first N products per emission.
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
