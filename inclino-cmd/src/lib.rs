//! Command implementations for the inclinometer CLI.
//!
//! Provides subcommands for bias-correcting a campaign against its
//! reference, tabulating recent campaigns for reports, and listing the
//! campaigns of a sensor document.

use anyhow::Context;
use clap::Subcommand;
use inclino_core::CampaignSet;
use inclino_data::DEFAULT_LAST_CAMPAIGNS;
use log::info;

pub mod campaigns;
pub mod correct;
pub mod table;

pub use correct::CorrectArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Build the correction table for a campaign and remove sensor drift
    Correct(CorrectArgs),

    /// Tabulate displacement for the last campaigns up to a cutoff
    Table {
        /// Path to the sensor document (JSON keyed by campaign timestamp)
        #[arg(short = 'd', long)]
        data: String,

        /// Close the window at the first campaign at or after this timestamp
        #[arg(long, conflicts_with = "slider")]
        cutoff: Option<String>,

        /// Close the window at this position among the active campaigns
        #[arg(long)]
        slider: Option<usize>,

        /// Number of campaigns to include
        #[arg(short = 'n', long, default_value_t = DEFAULT_LAST_CAMPAIGNS)]
        last: usize,

        /// Output path for the table JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// List the campaigns of a sensor document
    Campaigns {
        /// Path to the sensor document (JSON keyed by campaign timestamp)
        #[arg(short = 'd', long)]
        data: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Correct(args) => correct::run_correct(&args),
        Command::Table {
            data,
            cutoff,
            slider,
            last,
            output,
        } => table::run_table(&data, cutoff.as_deref(), slider, last, output.as_deref()),
        Command::Campaigns { data } => campaigns::run_campaigns(&data),
    }
}

/// Load a sensor document from disk.
pub fn load_campaigns(path: &str) -> anyhow::Result<CampaignSet> {
    let set = CampaignSet::from_path(path)
        .with_context(|| format!("Failed to load sensor document {path}"))?;
    info!("Loaded {} campaigns from {}", set.len(), path);
    Ok(set)
}
