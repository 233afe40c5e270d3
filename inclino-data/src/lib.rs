//! Displacement series, bias correction and report tables for
//! inclinometer campaigns.
//!
//! The crate turns raw per-depth deviation readings into cumulative
//! displacement, removes piecewise-linear sensor drift, and lays the result
//! out in depth-indexed tables for chart and report collaborators.

pub mod bias;
pub mod error;
pub mod report;
pub mod series;

pub use bias::{
    Axis, AxisCorrection, AxisFailure, BiasCorrector, CorrectedRow, CorrectedTable,
    CorrectionParams, CorrectionStep, CorrectionSummary,
};
pub use error::{DataError, Result};
pub use report::{build_report_table, Cutoff, ReportTable, DEFAULT_LAST_CAMPAIGNS};
pub use series::{build_correction_table, build_correction_table_checked, CorrectionTable};

/// Cumulative operations accumulated from the last row back to the first.
///
/// Displacement is integrated from the fixed (deepest) end of the hole, so
/// every running operation here walks the series in reverse.
pub mod cumulative {
    /// Reverse, apply a running operation, reverse back.
    fn reverse_scan<F>(values: &[f64], mut step: F) -> Vec<f64>
    where
        F: FnMut(usize, f64) -> f64,
    {
        let mut out: Vec<f64> = values
            .iter()
            .rev()
            .enumerate()
            .map(|(i, v)| step(i, *v))
            .collect();
        out.reverse();
        out
    }

    /// `out[i] = values[i] + values[i + 1] + ... + values[n - 1]`
    pub fn reverse_cumulative_sum(values: &[f64]) -> Vec<f64> {
        let mut acc = 0.0;
        reverse_scan(values, |_, v| {
            acc += v;
            acc
        })
    }

    /// Mean of `values[i..]` for every `i`.
    pub fn reverse_expanding_mean(values: &[f64]) -> Vec<f64> {
        let mut acc = 0.0;
        reverse_scan(values, |i, v| {
            acc += v;
            acc / (i + 1) as f64
        })
    }

}

/// Depth lookups shared by the corrector and the report tables.
pub mod depth {
    /// Row whose depth is nearest to `target`, if within `tolerance`.
    ///
    /// Ties resolve to the lower row index.
    pub fn nearest_depth_index(depths: &[f64], target: f64, tolerance: f64) -> Option<usize> {
        depths
            .iter()
            .enumerate()
            .map(|(i, d)| (i, (d - target).abs()))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(i, _)| i)
    }

}
