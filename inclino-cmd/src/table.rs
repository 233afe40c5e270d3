//! Report table for the most recent campaigns.

use crate::load_campaigns;
use anyhow::Context;
use inclino_core::CampaignSet;
use inclino_data::{build_report_table, Cutoff, ReportTable};
use inclino_utils::dates::parse_timestamp;
use log::{info, warn};

/// Interpret the cutoff flags; `--cutoff` wins when both are given.
pub fn resolve_cutoff(cutoff: Option<&str>, slider: Option<usize>) -> anyhow::Result<Cutoff> {
    match (cutoff, slider) {
        (Some(s), _) => Ok(Cutoff::Date(
            parse_timestamp(s).with_context(|| format!("Invalid cutoff {s}"))?,
        )),
        (None, Some(i)) => Ok(Cutoff::Index(i)),
        (None, None) => Ok(Cutoff::Latest),
    }
}

pub fn tabulate(set: &CampaignSet, cutoff: Cutoff, last: usize) -> ReportTable {
    let table = build_report_table(set, cutoff, last);
    match &table.error {
        Some(error) => warn!("Report table unavailable: {error}"),
        None => info!(
            "Report table: {} campaigns, {} depth rows",
            table.headers.len(),
            table.rows.len()
        ),
    }
    table
}

pub fn run_table(
    data: &str,
    cutoff: Option<&str>,
    slider: Option<usize>,
    last: usize,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let cutoff = resolve_cutoff(cutoff, slider)?;
    let table = match load_campaigns(data) {
        Ok(set) => tabulate(&set, cutoff, last),
        Err(e) => {
            warn!("Report table unavailable: {e:#}");
            ReportTable::failed(format!("{e:#}"))
        }
    };
    let json = serde_json::to_string_pretty(&table)?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
            info!("Wrote report table to {}", path);
        }
        None => println!("{json}"),
    }
    Ok(())
}
