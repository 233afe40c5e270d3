use crate::cumulative::{reverse_cumulative_sum, reverse_expanding_mean};
use crate::error::{DataError, Result};
use inclino_core::Reading;
use inclino_utils::numbers::approx_eq;
use log::debug;
use serde::Serialize;

/// Per-depth comparison of a reference campaign and a target campaign.
///
/// Rows follow the target campaign's reading order. `desp_*` is integrated
/// from the last row, so `desp_a[i]` is the sum of `incr_dev_a[i..]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionTable {
    pub depth: Vec<f64>,
    pub dev_a_ref: Vec<f64>,
    pub dev_b_ref: Vec<f64>,
    pub dev_a_corr: Vec<f64>,
    pub dev_b_corr: Vec<f64>,
    pub checksum_a_ref: Vec<f64>,
    pub checksum_b_ref: Vec<f64>,
    pub checksum_a_corr: Vec<f64>,
    pub checksum_b_corr: Vec<f64>,
    pub incr_dev_a: Vec<f64>,
    pub incr_dev_b: Vec<f64>,
    pub desp_a: Vec<f64>,
    pub desp_b: Vec<f64>,
    /// Diagnostic only.
    pub incr_checksum_a: Vec<f64>,
    /// Diagnostic only.
    pub incr_checksum_b: Vec<f64>,
    /// Diagnostic only.
    pub avg_incr_a: Vec<f64>,
    /// Diagnostic only.
    pub avg_incr_b: Vec<f64>,
}

/// One row of a [`CorrectionTable`], named as downstream renderers expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectionRow {
    pub depth: f64,
    pub dev_a_ref: f64,
    pub dev_b_ref: f64,
    pub dev_a_corr: f64,
    pub dev_b_corr: f64,
    pub checksum_a_ref: f64,
    pub checksum_b_ref: f64,
    pub checksum_a_corr: f64,
    pub checksum_b_corr: f64,
    pub incr_dev_a: f64,
    pub incr_dev_b: f64,
    pub desp_a: f64,
    pub desp_b: f64,
    pub incr_checksum_a: f64,
    pub incr_checksum_b: f64,
    #[serde(rename = "avg_Incr_A")]
    pub avg_incr_a: f64,
    #[serde(rename = "avg_Incr_B")]
    pub avg_incr_b: f64,
}

impl CorrectionTable {
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<CorrectionRow> {
        if i >= self.len() {
            return None;
        }
        Some(CorrectionRow {
            depth: self.depth[i],
            dev_a_ref: self.dev_a_ref[i],
            dev_b_ref: self.dev_b_ref[i],
            dev_a_corr: self.dev_a_corr[i],
            dev_b_corr: self.dev_b_corr[i],
            checksum_a_ref: self.checksum_a_ref[i],
            checksum_b_ref: self.checksum_b_ref[i],
            checksum_a_corr: self.checksum_a_corr[i],
            checksum_b_corr: self.checksum_b_corr[i],
            incr_dev_a: self.incr_dev_a[i],
            incr_dev_b: self.incr_dev_b[i],
            desp_a: self.desp_a[i],
            desp_b: self.desp_b[i],
            incr_checksum_a: self.incr_checksum_a[i],
            incr_checksum_b: self.incr_checksum_b[i],
            avg_incr_a: self.avg_incr_a[i],
            avg_incr_b: self.avg_incr_b[i],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = CorrectionRow> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }
}

fn difference(minuend: &[f64], subtrahend: &[f64]) -> Vec<f64> {
    minuend
        .iter()
        .zip(subtrahend)
        .map(|(m, s)| m - s)
        .collect()
}

/// Build the correction table from a reference campaign and the campaign
/// to correct. Rows are paired by position.
pub fn build_correction_table(calc_ref: &[Reading], calc_corr: &[Reading]) -> Result<CorrectionTable> {
    if calc_ref.len() != calc_corr.len() {
        return Err(DataError::ShapeMismatch {
            reference: calc_ref.len(),
            target: calc_corr.len(),
        });
    }

    let depth: Vec<f64> = calc_corr.iter().map(|r| r.depth).collect();
    let dev_a_ref: Vec<f64> = calc_ref.iter().map(Reading::dev_a).collect();
    let dev_b_ref: Vec<f64> = calc_ref.iter().map(Reading::dev_b).collect();
    let dev_a_corr: Vec<f64> = calc_corr.iter().map(Reading::dev_a).collect();
    let dev_b_corr: Vec<f64> = calc_corr.iter().map(Reading::dev_b).collect();
    let checksum_a_ref: Vec<f64> = calc_ref.iter().map(Reading::checksum_a).collect();
    let checksum_b_ref: Vec<f64> = calc_ref.iter().map(Reading::checksum_b).collect();
    let checksum_a_corr: Vec<f64> = calc_corr.iter().map(Reading::checksum_a).collect();
    let checksum_b_corr: Vec<f64> = calc_corr.iter().map(Reading::checksum_b).collect();

    let incr_dev_a = difference(&dev_a_corr, &dev_a_ref);
    let incr_dev_b = difference(&dev_b_corr, &dev_b_ref);
    let desp_a = reverse_cumulative_sum(&incr_dev_a);
    let desp_b = reverse_cumulative_sum(&incr_dev_b);

    let incr_checksum_a = difference(&checksum_a_corr, &checksum_a_ref);
    let incr_checksum_b = difference(&checksum_b_corr, &checksum_b_ref);
    let avg_incr_a = reverse_expanding_mean(&incr_dev_a);
    let avg_incr_b = reverse_expanding_mean(&incr_dev_b);

    debug!(
        "Correction table: {} rows, top displacement A={:?} B={:?}",
        depth.len(),
        desp_a.first(),
        desp_b.first()
    );

    Ok(CorrectionTable {
        depth,
        dev_a_ref,
        dev_b_ref,
        dev_a_corr,
        dev_b_corr,
        checksum_a_ref,
        checksum_b_ref,
        checksum_a_corr,
        checksum_b_corr,
        incr_dev_a,
        incr_dev_b,
        desp_a,
        desp_b,
        incr_checksum_a,
        incr_checksum_b,
        avg_incr_a,
        avg_incr_b,
    })
}

/// Like [`build_correction_table`], but also requires every row pair to sit
/// at the same depth within `tolerance`.
pub fn build_correction_table_checked(
    calc_ref: &[Reading],
    calc_corr: &[Reading],
    tolerance: f64,
) -> Result<CorrectionTable> {
    if let Some((row, (r, c))) = calc_ref
        .iter()
        .zip(calc_corr)
        .enumerate()
        .find(|(_, (r, c))| !approx_eq(r.depth, c.depth, tolerance))
    {
        return Err(DataError::Alignment {
            row,
            reference_depth: r.depth,
            target_depth: c.depth,
        });
    }
    build_correction_table(calc_ref, calc_corr)
}
