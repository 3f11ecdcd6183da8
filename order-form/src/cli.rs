//! Command line arguments
//!
//! A draft can come from `--json <FILE>` (`-` for stdin), from per-field
//! flags, or both; flags override values from the file.

use anyhow::Context;
use clap::Parser;
use shared::{Field, OrderDraft};
use std::path::{Path, PathBuf};

/// Validate and submit a dish order
#[derive(Debug, Clone, Parser)]
#[command(name = "order-form", version, about)]
pub struct Args {
    /// Read the order draft from a JSON file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Order name (1-50 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Preparation time, HH:MM:SS
    #[arg(long)]
    pub preparation_time: Option<String>,

    /// pizza | soup | sandwich
    #[arg(long, visible_alias = "type")]
    pub dish_type: Option<String>,

    /// Pizza: number of slices (0-12)
    #[arg(long, allow_hyphen_values = true)]
    pub no_of_slices: Option<String>,

    /// Pizza: diameter in cm (12-45)
    #[arg(long, allow_hyphen_values = true)]
    pub diameter: Option<String>,

    /// Soup: spiciness (0-10)
    #[arg(long, allow_hyphen_values = true)]
    pub spiciness_scale: Option<String>,

    /// Sandwich: slices of bread (1-20)
    #[arg(long, allow_hyphen_values = true)]
    pub slices_of_bread: Option<String>,

    /// Dish endpoint (overrides ORDER_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the pruned order instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Field values given as flags
    pub fn field_values(&self) -> Vec<(Field, &str)> {
        [
            (Field::Name, &self.name),
            (Field::PreparationTime, &self.preparation_time),
            (Field::DishType, &self.dish_type),
            (Field::NoOfSlices, &self.no_of_slices),
            (Field::Diameter, &self.diameter),
            (Field::SpicinessScale, &self.spiciness_scale),
            (Field::SlicesOfBread, &self.slices_of_bread),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Build the draft from `--json` and the field flags
    pub fn draft(&self) -> anyhow::Result<OrderDraft> {
        let mut draft = match &self.json {
            Some(path) => read_draft(path)?,
            None => OrderDraft::default(),
        };
        for (field, value) in self.field_values() {
            draft.set(field, value);
        }
        Ok(draft)
    }
}

fn read_draft(path: &Path) -> anyhow::Result<OrderDraft> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read order from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order file {}", path.display()))?
    };
    serde_json::from_str(&text).context("Order draft is not valid JSON")
}
