//! Depth-indexed displacement tables for inclinometer reports.
//!
//! Report generation never sees an `Err`: failures come back as an empty
//! [`ReportTable`] with `error` set, and callers check [`ReportTable::is_error`].

use crate::error::{DataError, Result};
use chrono::NaiveDateTime;
use inclino_core::{CampaignSet, DatedCampaign, Reading, DEPTH_TOLERANCE};
use inclino_utils::dates::format_timestamp;
use inclino_utils::numbers::{approx_eq, format_fixed};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of campaigns shown in a report table.
pub const DEFAULT_LAST_CAMPAIGNS: usize = 5;

/// Which campaign closes the report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// The most recent active campaign.
    Latest,
    /// First campaign at or after this time; the last one if none is.
    Date(NaiveDateTime),
    /// Position in the sorted active campaigns, clamped to the last.
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTable {
    /// One header per selected campaign, oldest first.
    #[serde(rename = "encabezados_nivel_1")]
    pub headers: Vec<String>,
    /// `prof` plus `desp_a_k` / `desp_b_k` for k = 1..=N.
    #[serde(rename = "filas")]
    pub rows: Vec<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportTable {
    pub fn failed(message: impl Into<String>) -> Self {
        ReportTable {
            headers: Vec::new(),
            rows: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Index of the campaign closing the window in an ascending list.
pub fn cutoff_index(timestamps: &[NaiveDateTime], cutoff: Cutoff) -> Option<usize> {
    let last = timestamps.len().checked_sub(1)?;
    Some(match cutoff {
        Cutoff::Latest => last,
        Cutoff::Index(i) => i.min(last),
        Cutoff::Date(date) => timestamps
            .iter()
            .position(|t| *t >= date)
            .unwrap_or(last),
    })
}

/// The last `count` active campaigns ending at the cutoff, oldest first.
pub fn select_campaigns<'a>(
    set: &'a CampaignSet,
    cutoff: Cutoff,
    count: usize,
) -> Result<Vec<DatedCampaign<'a>>> {
    if count == 0 {
        return Err(DataError::InvalidCount(count));
    }
    let sorted = set.sorted_active()?;
    let timestamps: Vec<NaiveDateTime> = sorted.iter().map(|d| d.timestamp).collect();
    let end = cutoff_index(&timestamps, cutoff).ok_or(DataError::NoCampaigns)?;
    let start = (end + 1).saturating_sub(count);
    debug!(
        "Selected campaigns {start}..={end} of {} for cutoff {cutoff:?}",
        sorted.len()
    );
    Ok(sorted[start..=end].to_vec())
}

/// Reading at `depth`: the same row position if it matches, otherwise the
/// first reading within tolerance.
fn match_reading(calc: &[Reading], row: usize, depth: f64) -> Option<&Reading> {
    let within = |r: &&Reading| approx_eq(r.depth, depth, DEPTH_TOLERANCE);
    calc.get(row)
        .filter(within)
        .or_else(|| calc.iter().find(within))
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| format_fixed(v, 2)).unwrap_or_default()
}

fn try_build_report_table(set: &CampaignSet, cutoff: Cutoff, count: usize) -> Result<ReportTable> {
    let selected = select_campaigns(set, cutoff, count)?;
    let earliest = selected.first().ok_or(DataError::NoCampaigns)?;

    let headers = selected
        .iter()
        .map(|d| format_timestamp(&d.timestamp))
        .collect();

    let rows = earliest
        .campaign
        .calc
        .iter()
        .enumerate()
        .map(|(row, base)| {
            let mut cells = BTreeMap::new();
            cells.insert("prof".to_string(), format_fixed(base.depth, 1));
            for (k, dated) in selected.iter().enumerate() {
                let reading = match_reading(&dated.campaign.calc, row, base.depth);
                let (desp_a, desp_b) = match reading {
                    Some(r) => (format_cell(r.desp_a), format_cell(r.desp_b)),
                    None => (String::new(), String::new()),
                };
                cells.insert(format!("desp_a_{}", k + 1), desp_a);
                cells.insert(format!("desp_b_{}", k + 1), desp_b);
            }
            cells
        })
        .collect();

    Ok(ReportTable {
        headers,
        rows,
        error: None,
    })
}

/// Build the report table for the `count` campaigns ending at `cutoff`.
pub fn build_report_table(set: &CampaignSet, cutoff: Cutoff, count: usize) -> ReportTable {
    match try_build_report_table(set, cutoff, count) {
        Ok(table) => table,
        Err(e) => {
            warn!("Report table failed: {e}");
            ReportTable::failed(e.to_string())
        }
    }
}
