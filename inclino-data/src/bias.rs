use crate::depth::nearest_depth_index;
use crate::error::{DataError, Result};
use crate::series::CorrectionTable;
use inclino_core::DEPTH_TOLERANCE;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Measurement axis of the probe.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Axis {
    A,
    B,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::A => write!(f, "A"),
            Axis::B => write!(f, "B"),
        }
    }
}

/// Parse an operator-entered correction, falling back to zero.
pub fn coerce_delta(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!("Ignoring non-numeric correction {raw:?}");
            0.0
        }
    }
}

fn lenient_delta<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => coerce_delta(&n.to_string()),
        Value::String(s) => coerce_delta(&s),
        other => {
            warn!("Ignoring non-numeric correction {other}");
            0.0
        }
    })
}

/// One linear ramp: `delta` is the total correction spread over the rows
/// whose depth lies in `[h_sup, h_inf]`.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct CorrectionStep {
    pub h_inf: f64,
    pub h_sup: f64,
    #[serde(default, deserialize_with = "lenient_delta")]
    pub delta: f64,
}

/// How a step distributes its correction over the table.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct StepPlan {
    pub row_count: usize,
    pub delta_per_row: f64,
}

impl CorrectionStep {
    pub fn new(h_inf: f64, h_sup: f64, delta: f64) -> Self {
        CorrectionStep { h_inf, h_sup, delta }
    }

    /// Whether `depth` lies in `[h_sup, h_inf]`, widened by `tolerance` on
    /// both ends so a boundary matched to a row always counts that row.
    pub fn contains(&self, depth: f64, tolerance: f64) -> bool {
        depth <= self.h_inf + tolerance && depth >= self.h_sup - tolerance
    }

    /// `None` when the step is a no-op: zero or non-finite delta, or no
    /// row inside the range.
    pub fn plan(&self, depths: &[f64], tolerance: f64) -> Option<StepPlan> {
        if !self.delta.is_finite() || self.delta == 0.0 {
            return None;
        }
        let row_count = depths
            .iter()
            .filter(|d| self.contains(**d, tolerance))
            .count();
        if row_count == 0 {
            return None;
        }
        Some(StepPlan {
            row_count,
            delta_per_row: self.delta / row_count as f64,
        })
    }
}

/// Up to two correction steps for one axis. Their curves add up.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AxisCorrection {
    #[serde(default)]
    pub step_1: Option<CorrectionStep>,
    #[serde(default)]
    pub step_2: Option<CorrectionStep>,
}

impl AxisCorrection {
    pub fn single(step: CorrectionStep) -> Self {
        AxisCorrection {
            step_1: Some(step),
            step_2: None,
        }
    }

    fn steps(&self) -> impl Iterator<Item = &CorrectionStep> {
        self.step_1.iter().chain(self.step_2.iter())
    }
}

/// Correction parameters for both axes.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CorrectionParams {
    #[serde(default)]
    pub a: AxisCorrection,
    #[serde(default)]
    pub b: AxisCorrection,
}

impl CorrectionParams {
    pub fn axis(&self, axis: Axis) -> &AxisCorrection {
        match axis {
            Axis::A => &self.a,
            Axis::B => &self.b,
        }
    }
}

/// An axis whose correction could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFailure {
    pub axis: Axis,
    pub message: String,
}

/// Correction table with the bias curves and corrected series appended.
///
/// Axes are corrected independently. An axis listed in `failures` keeps a
/// zero `recta` and its `corr` equals the uncorrected displacement.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedTable {
    pub table: CorrectionTable,
    pub recta_a: Vec<f64>,
    pub recta_b: Vec<f64>,
    pub corr_a: Vec<f64>,
    pub corr_b: Vec<f64>,
    pub failures: Vec<AxisFailure>,
}

/// One exported row of a [`CorrectedTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectedRow {
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
    pub recta_a: f64,
    pub recta_b: f64,
    pub corr_a: f64,
    pub corr_b: f64,
}

/// Largest corrected displacement on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisSummary {
    pub max_abs_corr: f64,
    pub depth_at_max: f64,
    /// Corrected displacement at row 0, the free end.
    pub top_corr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrectionSummary {
    pub a: Option<AxisSummary>,
    pub b: Option<AxisSummary>,
}

impl CorrectedTable {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn recta(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::A => &self.recta_a,
            Axis::B => &self.recta_b,
        }
    }

    pub fn corr(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::A => &self.corr_a,
            Axis::B => &self.corr_b,
        }
    }

    pub fn failure(&self, axis: Axis) -> Option<&AxisFailure> {
        self.failures.iter().find(|f| f.axis == axis)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = CorrectedRow> + '_ {
        self.table.rows().enumerate().map(|(i, row)| CorrectedRow {
            depth: row.depth,
            dev_a_ref: row.dev_a_ref,
            dev_b_ref: row.dev_b_ref,
            dev_a_corr: row.dev_a_corr,
            dev_b_corr: row.dev_b_corr,
            checksum_a_ref: row.checksum_a_ref,
            checksum_b_ref: row.checksum_b_ref,
            checksum_a_corr: row.checksum_a_corr,
            checksum_b_corr: row.checksum_b_corr,
            incr_dev_a: row.incr_dev_a,
            incr_dev_b: row.incr_dev_b,
            desp_a: row.desp_a,
            desp_b: row.desp_b,
            incr_checksum_a: row.incr_checksum_a,
            incr_checksum_b: row.incr_checksum_b,
            avg_incr_a: row.avg_incr_a,
            avg_incr_b: row.avg_incr_b,
            recta_a: self.recta_a[i],
            recta_b: self.recta_b[i],
            corr_a: self.corr_a[i],
            corr_b: self.corr_b[i],
        })
    }

    fn axis_summary(&self, axis: Axis) -> Option<AxisSummary> {
        let corr = self.corr(axis);
        let top_corr = *corr.first()?;
        let (i, max) = corr
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))?;
        Some(AxisSummary {
            max_abs_corr: max.abs(),
            depth_at_max: self.table.depth[i],
            top_corr,
        })
    }

    pub fn summary(&self) -> CorrectionSummary {
        CorrectionSummary {
            a: self.axis_summary(Axis::A),
            b: self.axis_summary(Axis::B),
        }
    }
}

/// Removes piecewise-linear drift from cumulative displacement.
///
/// Boundary depths are matched to rows within `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasCorrector {
    tolerance: f64,
}

impl Default for BiasCorrector {
    fn default() -> Self {
        BiasCorrector {
            tolerance: DEPTH_TOLERANCE,
        }
    }
}

impl BiasCorrector {
    pub fn with_tolerance(tolerance: f64) -> Self {
        BiasCorrector { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Compute `recta_*` for both axes and subtract it from `desp_*`.
    ///
    /// A failing axis is recorded in [`CorrectedTable::failures`] and left
    /// uncorrected; the other axis is unaffected.
    pub fn apply(&self, table: CorrectionTable, params: &CorrectionParams) -> CorrectedTable {
        let mut failures = Vec::new();
        let mut curve_for = |axis: Axis| {
            match self.correction_curve(&table.depth, axis, params.axis(axis)) {
                Ok(curve) => curve,
                Err(e) => {
                    warn!("Axis {axis} left uncorrected: {e}");
                    failures.push(AxisFailure {
                        axis,
                        message: e.to_string(),
                    });
                    vec![0.0; table.len()]
                }
            }
        };
        let recta_a = curve_for(Axis::A);
        let recta_b = curve_for(Axis::B);
        let corr_a = subtract(&table.desp_a, &recta_a);
        let corr_b = subtract(&table.desp_b, &recta_b);
        CorrectedTable {
            table,
            recta_a,
            recta_b,
            corr_a,
            corr_b,
            failures,
        }
    }

    /// Sum of the step curves configured for one axis.
    pub fn correction_curve(
        &self,
        depths: &[f64],
        axis: Axis,
        correction: &AxisCorrection,
    ) -> Result<Vec<f64>> {
        let mut curve = vec![0.0; depths.len()];
        for step in correction.steps() {
            let step_curve = self.step_curve(depths, axis, step)?;
            for (total, value) in curve.iter_mut().zip(step_curve) {
                *total += value;
            }
        }
        Ok(curve)
    }

    /// Polyline for a single step, walked from the last row to the first:
    /// zero before the range, a ramp linear in row index inside it, and a
    /// plateau at the value reached on the far boundary after it.
    pub fn step_curve(&self, depths: &[f64], axis: Axis, step: &CorrectionStep) -> Result<Vec<f64>> {
        let mut curve = vec![0.0; depths.len()];
        let Some(plan) = step.plan(depths, self.tolerance) else {
            debug!(
                "Axis {axis}: step [{}, {}] delta {} is a no-op",
                step.h_sup, step.h_inf, step.delta
            );
            return Ok(curve);
        };

        let inf_row = self.boundary_row(depths, axis, step.h_inf)?;
        let sup_row = self.boundary_row(depths, axis, step.h_sup)?;
        // The ramp starts at zero on the boundary nearest the fixed end.
        let anchor = inf_row.max(sup_row) as f64;
        debug!(
            "Axis {axis}: {} rows in [{}, {}], {} per row, boundary rows {inf_row}/{sup_row}",
            plan.row_count, step.h_sup, step.h_inf, plan.delta_per_row
        );

        let mut offset = 0.0;
        for row in (0..depths.len()).rev() {
            let value = if step.contains(depths[row], self.tolerance) {
                offset + plan.delta_per_row * (anchor - row as f64)
            } else {
                offset
            };
            curve[row] = value;
            if row == inf_row || row == sup_row {
                offset = value;
            }
        }
        Ok(curve)
    }

    fn boundary_row(&self, depths: &[f64], axis: Axis, depth: f64) -> Result<usize> {
        nearest_depth_index(depths, depth, self.tolerance)
            .ok_or(DataError::BoundaryNotFound { axis, depth })
    }
}

fn subtract(desp: &[f64], recta: &[f64]) -> Vec<f64> {
    desp.iter().zip(recta).map(|(d, r)| d - r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inclino_utils::numbers::{approx_eq, EPSILON};

    fn table_with_depths(depths: &[f64], desp: f64) -> CorrectionTable {
        let zeros = vec![0.0; depths.len()];
        CorrectionTable {
            depth: depths.to_vec(),
            dev_a_ref: zeros.clone(),
            dev_b_ref: zeros.clone(),
            dev_a_corr: zeros.clone(),
            dev_b_corr: zeros.clone(),
            checksum_a_ref: zeros.clone(),
            checksum_b_ref: zeros.clone(),
            checksum_a_corr: zeros.clone(),
            checksum_b_corr: zeros.clone(),
            incr_dev_a: zeros.clone(),
            incr_dev_b: zeros.clone(),
            desp_a: vec![desp; depths.len()],
            desp_b: vec![-desp; depths.len()],
            incr_checksum_a: zeros.clone(),
            incr_checksum_b: zeros.clone(),
            avg_incr_a: zeros.clone(),
            avg_incr_b: zeros,
        }
    }


    fn ten_depths() -> Vec<f64> {
        (0..10).map(|i| i as f64).collect()
    }

    #[test]
    fn test_ramp_in_increasing_table() {
        let depths = ten_depths();
        let step = CorrectionStep::new(6.0, 2.0, 5.0);
        let curve = BiasCorrector::default()
            .step_curve(&depths, Axis::A, &step)
            .unwrap();
        // 5 rows in [2, 6], 1.0 per row, anchored at depth 6
        let expected = [4.0, 4.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        for (got, want) in curve.iter().zip(expected) {
            assert!(approx_eq(*got, want, EPSILON), "{curve:?}");
        }
    }

    #[test]
    fn test_ramp_in_decreasing_table() {
        let depths: Vec<f64> = ten_depths().into_iter().rev().collect();
        let step = CorrectionStep::new(6.0, 2.0, 5.0);
        let curve = BiasCorrector::default()
            .step_curve(&depths, Axis::A, &step)
            .unwrap();
        // depth 2 sits at row 7, depth 6 at row 3
        let expected = [4.0, 4.0, 4.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0];
        for (got, want) in curve.iter().zip(expected) {
            assert!(approx_eq(*got, want, EPSILON), "{curve:?}");
        }
    }

    #[test]
    fn test_continuity_at_boundaries() {
        let depths = ten_depths();
        let step = CorrectionStep::new(7.0, 3.0, -2.5);
        let curve = BiasCorrector::default()
            .step_curve(&depths, Axis::B, &step)
            .unwrap();
        // Row 8 is just outside the deep boundary, row 2 just outside the shallow one.
        assert!(approx_eq(curve[8], curve[7], EPSILON));
        assert!(approx_eq(curve[2], curve[3], EPSILON));
        assert!(approx_eq(curve[0], curve[3], EPSILON));
        assert!(approx_eq(curve[9], 0.0, EPSILON));
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let depths = ten_depths();
        let table = table_with_depths(&depths, 1.5);
        let params = CorrectionParams {
            a: AxisCorrection::single(CorrectionStep::new(6.0, 2.0, 0.0)),
            b: AxisCorrection::single(CorrectionStep::new(123.0, 456.0, 0.0)),
        };
        let corrected = BiasCorrector::default().apply(table.clone(), &params);
        assert_eq!(corrected.corr_a, table.desp_a);
        assert_eq!(corrected.corr_b, table.desp_b);
        assert!(corrected.recta_a.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_range_neutralises_axis_only() {
        let depths = ten_depths();
        let table = table_with_depths(&depths, 1.0);
        let params = CorrectionParams {
            a: AxisCorrection::single(CorrectionStep::new(100.0, 200.0, 5.0)),
            b: AxisCorrection::single(CorrectionStep::new(6.0, 2.0, 5.0)),
        };
        let corrected = BiasCorrector::default().apply(table.clone(), &params);
        assert_eq!(corrected.corr_a, table.desp_a);
        assert!(approx_eq(corrected.recta_b[0], 4.0, EPSILON));
        assert!(approx_eq(corrected.corr_b[0], -1.0 - 4.0, EPSILON));
    }

    #[test]
    fn test_wider_range_spreads_delta_thinner() {
        let depths = ten_depths();
        let tol = DEPTH_TOLERANCE;
        let narrow = CorrectionStep::new(5.0, 4.0, 3.0).plan(&depths, tol).unwrap();
        let wide = CorrectionStep::new(7.0, 2.0, 3.0).plan(&depths, tol).unwrap();
        let widest = CorrectionStep::new(9.0, 0.0, 3.0).plan(&depths, tol).unwrap();
        assert_eq!(narrow.row_count, 2);
        assert_eq!(wide.row_count, 6);
        assert_eq!(widest.row_count, 10);
        assert!(narrow.delta_per_row.abs() > wide.delta_per_row.abs());
        assert!(wide.delta_per_row.abs() > widest.delta_per_row.abs());
        assert!(CorrectionStep::new(50.0, 40.0, 3.0).plan(&depths, tol).is_none());
    }

    #[test]
    fn test_boundary_not_found() {
        let depths = [0.0, 0.5, 1.0, 1.5, 2.0];
        let step = CorrectionStep::new(1.75, 0.5, 1.0);
        let result = BiasCorrector::default().step_curve(&depths, Axis::A, &step);
        assert!(matches!(
            result,
            Err(DataError::BoundaryNotFound { axis: Axis::A, depth }) if depth == 1.75
        ));
    }

    #[test]
    fn test_missing_boundary_leaves_other_axis_corrected() {
        let depths = [0.0, 0.5, 1.0, 1.5, 2.0];
        let table = table_with_depths(&depths, 1.0);
        let params = CorrectionParams {
            a: AxisCorrection::single(CorrectionStep::new(1.75, 0.5, 1.0)),
            b: AxisCorrection::single(CorrectionStep::new(1.5, 0.5, 3.0)),
        };
        let corrected = BiasCorrector::default().apply(table.clone(), &params);
        assert!(!corrected.is_complete());
        let failure = corrected.failure(Axis::A).unwrap();
        assert!(failure.message.contains("1.75"));
        assert!(corrected.recta_a.iter().all(|v| *v == 0.0));
        assert_eq!(corrected.corr_a, table.desp_a);
        assert_eq!(corrected.failure(Axis::B), None);
        assert_eq!(corrected.recta_b, vec![2.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_boundary_near_a_row_counts_that_row() {
        let depths = [0.0, 0.5, 1.0, 1.5, 2.0];
        let corrector = BiasCorrector::default();
        let exact = corrector
            .step_curve(&depths, Axis::A, &CorrectionStep::new(1.5, 0.5, 3.0))
            .unwrap();
        for h_inf in [1.496, 1.504] {
            let near = corrector
                .step_curve(&depths, Axis::A, &CorrectionStep::new(h_inf, 0.5, 3.0))
                .unwrap();
            assert_eq!(near, exact, "h_inf {h_inf}");
        }
        let shallow = corrector
            .step_curve(&depths, Axis::A, &CorrectionStep::new(1.5, 0.503, 3.0))
            .unwrap();
        assert_eq!(shallow, exact);
        assert_eq!(exact, vec![2.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let depths = [0.0, 0.5, 1.0, 1.5, 2.0];
        let step = CorrectionStep::new(1.45, 0.5, 3.0);
        assert!(BiasCorrector::default()
            .step_curve(&depths, Axis::B, &step)
            .is_err());
        let loose = BiasCorrector::with_tolerance(0.1);
        assert_eq!(loose.tolerance(), 0.1);
        let curve = loose.step_curve(&depths, Axis::B, &step).unwrap();
        assert_eq!(curve, vec![2.0, 2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_boundary_within_tolerance() {
        let depths = [0.0, 0.5, 1.0, 1.5, 2.0];
        let step = CorrectionStep::new(1.504, 0.5, 1.0);
        let curve = BiasCorrector::default()
            .step_curve(&depths, Axis::A, &step)
            .unwrap();
        // three rows in range, anchored on the 1.5 row
        assert!(approx_eq(curve[4], 0.0, EPSILON));
        assert!(approx_eq(curve[3], 0.0, EPSILON));
        assert!(approx_eq(curve[2], 1.0 / 3.0, EPSILON));
        assert!(approx_eq(curve[1], 2.0 / 3.0, EPSILON));
        assert!(approx_eq(curve[0], 2.0 / 3.0, EPSILON));
    }

    #[test]
    fn test_two_steps_stack() {
        let depths = ten_depths();
        let correction = AxisCorrection {
            step_1: Some(CorrectionStep::new(8.0, 6.0, 3.0)),
            step_2: Some(CorrectionStep::new(3.0, 1.0, 6.0)),
        };
        let curve = BiasCorrector::default()
            .correction_curve(&depths, Axis::A, &correction)
            .unwrap();
        // deep ramp: 1 per row over rows 8..6, plateau 2; shallow ramp: 2 per row over rows 3..1
        let expected = [6.0, 6.0, 4.0, 2.0, 2.0, 2.0, 2.0, 1.0, 0.0, 0.0];
        for (got, want) in curve.iter().zip(expected) {
            assert!(approx_eq(*got, want, EPSILON), "{curve:?}");
        }
    }

    #[test]
    fn test_ramp_ignores_depth_spacing() {
        let depths = [0.0, 0.5, 3.0, 3.5, 10.0];
        let step = CorrectionStep::new(10.0, 0.0, 5.0);
        let curve = BiasCorrector::default()
            .step_curve(&depths, Axis::A, &step)
            .unwrap();
        let expected = [4.0, 3.0, 2.0, 1.0, 0.0];
        for (got, want) in curve.iter().zip(expected) {
            assert!(approx_eq(*got, want, EPSILON), "{curve:?}");
        }
    }

    #[test]
    fn test_lenient_delta_parsing() {
        let params: CorrectionParams = serde_json::from_str(
            r#"{
                "a": {"step_1": {"h_inf": 6.0, "h_sup": 2.0, "delta": "abc"}},
                "b": {"step_1": {"h_inf": 6.0, "h_sup": 2.0, "delta": " 1.5 "},
                      "step_2": {"h_inf": 9.0, "h_sup": 7.0, "delta": null}}
            }"#,
        )
        .unwrap();
        assert_eq!(params.a.step_1.unwrap().delta, 0.0);
        assert_eq!(params.b.step_1.unwrap().delta, 1.5);
        assert_eq!(params.b.step_2.unwrap().delta, 0.0);
        assert_eq!(params.axis(Axis::A).step_2, None);

        let step: CorrectionStep =
            serde_json::from_str(r#"{"h_inf": 2, "h_sup": 1, "delta": -2.5}"#).unwrap();
        assert_eq!(step.delta, -2.5);
        let step: CorrectionStep = serde_json::from_str(r#"{"h_inf": 2, "h_sup": 1}"#).unwrap();
        assert_eq!(step.delta, 0.0);
    }

    #[test]
    fn test_coerce_delta() {
        assert_eq!(coerce_delta("2.25"), 2.25);
        assert_eq!(coerce_delta("-1"), -1.0);
        assert_eq!(coerce_delta(""), 0.0);
        assert_eq!(coerce_delta("NaN"), 0.0);
        assert_eq!(coerce_delta("1,5"), 0.0);
    }

    #[test]
    fn test_summary() {
        let depths = [0.0, 1.0, 2.0];
        let mut table = table_with_depths(&depths, 0.0);
        table.desp_a = vec![0.5, -2.0, 1.0];
        let corrected = BiasCorrector::default()
            .apply(table, &CorrectionParams::default());
        let summary = corrected.summary();
        let a = summary.a.unwrap();
        assert_eq!(a.max_abs_corr, 2.0);
        assert_eq!(a.depth_at_max, 1.0);
        assert_eq!(a.top_corr, 0.5);
        assert_eq!(corrected.rows().count(), 3);
    }

    #[test]
    fn test_summary_empty_table() {
        let corrected = BiasCorrector::default()
            .apply(CorrectionTable::default(), &CorrectionParams::default());
        assert!(corrected.is_empty());
        assert_eq!(corrected.summary().a, None);
    }
}
